use serde::{Deserialize, Serialize};

use crate::{
    model::{BaseModel, Record},
    validate,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintSpec {
    pub name: String,
    pub complain: String,
    /// An image URL or a base64-encoded picture of the issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl BaseModel for ComplaintSpec {
    const KEY: &'static str = "Complain";
    const ID_FIELD: &'static str = "complainID";
}

impl ComplaintSpec {
    pub fn validate(&self) -> validate::Result {
        validate::require("Name", &self.name)?;
        validate::require("Complain", &self.complain)
    }
}

pub type Complaint = Record<ComplaintSpec>;
