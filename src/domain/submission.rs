use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use super::user_type::UserType;

pub const USER_TYPE_FIELD: &str = "userType";

/// Fields with a dedicated column, in the order they are written after the timestamp.
pub const FIXED_FIELDS: [&str; 8] = [
    "name",
    "email",
    "phoneNumber",
    "propertyType",
    "location",
    "bedrooms",
    "timeline",
    "budget",
];

/// Raw form payload. Keys keep the order they had in the request body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FormSubmission(IndexMap<String, Value>);

impl FormSubmission {
    /// Fails only on malformed JSON. A body that is valid JSON but not an object
    /// carries no fields, so it surfaces later as a missing `userType`.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<Value>(body)? {
            Value::Object(fields) => Ok(fields.into_iter().collect()),
            _ => Ok(FormSubmission::default()),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// `None` when the discriminator is absent, not a string, or not one of the legal values.
    pub fn user_type(&self) -> Option<UserType> {
        self.get(USER_TYPE_FIELD)
            .and_then(Value::as_str)
            .and_then(|raw| UserType::from_str(raw).ok())
    }

    /// Every field that is neither the discriminator nor a fixed field, in submission order.
    pub fn extra_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0
            .iter()
            .filter(|(key, _)| !is_reserved(key))
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for FormSubmission {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        FormSubmission(iter.into_iter().collect())
    }
}

fn is_reserved(key: &str) -> bool {
    key == USER_TYPE_FIELD || FIXED_FIELDS.contains(&key)
}
