//! Opaque patient record

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Map, Value as JsonValue};

/// A patient as exchanged with clients and stores.
///
/// Only `id` has meaning to this crate. Every other member of the JSON object
/// is kept in `fields` exactly as received. A scalar `id` in the body is read
/// as its string form, so `42` and `"42"` name the same record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    #[serde(
        default,
        deserialize_with = "scalar_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, JsonValue>,
}

impl Patient {
    /// Build a patient without an id from a JSON object's members.
    pub fn from_fields(fields: Map<String, JsonValue>) -> Self {
        Self { id: None, fields }
    }

    /// The identifier, treating an empty string as absent.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Replace whatever identifier the record carried.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.set_id(id);
        self
    }

    /// The record's members without `id`, as stored by durable backends.
    pub fn into_fields(self) -> JsonValue {
        JsonValue::Object(self.fields)
    }
}

fn scalar_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonValue::deserialize(deserializer)? {
        JsonValue::Null => Ok(None),
        JsonValue::String(id) => Ok(Some(id)),
        JsonValue::Number(n) => Ok(Some(n.to_string())),
        JsonValue::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!(
            "id must be a string or number, got {}",
            other
        ))),
    }
}
