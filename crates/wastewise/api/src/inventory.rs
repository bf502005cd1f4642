use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    model::{BaseModel, Record},
    validate,
};

/// A row of the admin bin inventory table.
///
/// Unlike [`crate::bin::BinLocationSpec`], the inventory keeps its
/// coordinates as a free-form `"lat,lng"` string and its type and status as
/// plain codes chosen by the operators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinInventorySpec {
    pub address: String,
    #[serde(default)]
    pub coordinates: String,
    #[serde(default, rename = "type")]
    pub kind: i32,
    #[serde(default)]
    pub status: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDateTime>,
}

impl BaseModel for BinInventorySpec {
    const KEY: &'static str = "Bin";
    const ID_FIELD: &'static str = "locationId";
}

impl BinInventorySpec {
    pub fn validate(&self) -> validate::Result {
        validate::require("Address", &self.address)
    }

    /// Applies an operator edit; the status code is managed separately and
    /// survives the update.
    pub fn merge_update(self, update: Self) -> Self {
        Self {
            status: self.status,
            ..update
        }
    }
}

pub type BinInventory = Record<BinInventorySpec>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_preserves_status() {
        let stored = BinInventorySpec {
            address: "Main St".into(),
            coordinates: "6.9,79.8".into(),
            kind: 1,
            status: 2,
            last_updated: None,
        };
        let update = BinInventorySpec {
            address: "Main Street".into(),
            coordinates: "6.91,79.81".into(),
            kind: 3,
            status: 0,
            last_updated: None,
        };

        let merged = stored.merge_update(update);
        assert_eq!(merged.address, "Main Street");
        assert_eq!(merged.kind, 3);
        assert_eq!(merged.status, 2);
    }

    #[test]
    fn type_is_renamed_on_wire() {
        let value = ::serde_json::json!({"address": "a", "type": 4});
        let spec: BinInventorySpec = ::serde_json::from_value(value).unwrap();
        assert_eq!(spec.kind, 4);
        assert_eq!(spec.status, 0);
    }
}
