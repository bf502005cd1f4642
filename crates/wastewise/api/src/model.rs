use std::fmt;

use serde::{
    de::{self, DeserializeOwned},
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::{Map, Value};

pub type Id = i32;

pub trait BaseModel
where
    Self: Serialize + DeserializeOwned,
{
    /// A human-readable resource name, used in log and error messages.
    const KEY: &'static str;

    /// The name of the identifier field on the wire.
    const ID_FIELD: &'static str;
}

/// A stored resource: its spec flattened together with its identifier.
///
/// The identifier field name follows [`BaseModel::ID_FIELD`], so a feedback
/// record is rendered as `{"feedbackId": 1, "username": ...}` while a bin
/// location is rendered as `{"id": 1, "address": ...}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Record<S> {
    pub id: Id,
    pub spec: S,
}

impl<S> Record<S> {
    pub const fn new(id: Id, spec: S) -> Self {
        Self { id, spec }
    }
}

impl<S> Serialize for Record<S>
where
    S: BaseModel,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        use serde::ser::Error;

        let mut fields = match ::serde_json::to_value(&self.spec).map_err(Ser::Error::custom)? {
            Value::Object(fields) => fields,
            _ => return Err(Ser::Error::custom("the spec is not an object")),
        };
        fields.insert(S::ID_FIELD.into(), self.id.into());
        Value::Object(fields).serialize(serializer)
    }
}

impl<'de, S> Deserialize<'de> for Record<S>
where
    S: BaseModel,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::deserialize(deserializer)?;
        let id = fields
            .remove(S::ID_FIELD)
            .ok_or_else(|| de::Error::missing_field(S::ID_FIELD))
            .and_then(|id| ::serde_json::from_value(id).map_err(de::Error::custom))?;
        let spec = ::serde_json::from_value(Value::Object(fields)).map_err(de::Error::custom)?;
        Ok(Self { id, spec })
    }
}

impl<S> fmt::Display for Record<S>
where
    S: BaseModel,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", S::KEY, self.id)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// A plain-text acknowledgement returned by save and delete operations.
pub type Message = String;
