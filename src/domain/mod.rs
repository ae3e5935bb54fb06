//! Domain entities
//!
//! Each entity owns its validation and mutation rules; route handlers and
//! repositories never bypass them.

pub mod category;
pub mod task;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Errors raised by entity constructors and mutators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A field value violates an entity invariant
    #[error("{message}")]
    InvalidArgument {
        field: &'static str,
        message: &'static str,
    },

    /// An illegal state transition was attempted
    #[error("{0}")]
    InvalidState(&'static str),
}

impl DomainError {
    pub fn invalid_argument(field: &'static str, message: &'static str) -> Self {
        Self::InvalidArgument { field, message }
    }
}

/// Per-field presence marker for partial updates.
///
/// A plain `Option` cannot distinguish "field omitted from the request"
/// from "field explicitly set to null", and null is a meaningful value for
/// clearable fields such as a task description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not part of the request
    Missing,
    /// The field was provided as an explicit null
    Null,
    /// The field was provided with a value
    Value(T),
}

// Manual impl: the derive would demand T: Default, which timestamps lack
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// The provided value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

// Fields must carry `#[serde(default)]` so an omitted key becomes Missing;
// serde only calls this deserializer when the key is present.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Body {
        #[serde(default)]
        description: Patch<String>,
    }

    #[test]
    fn omitted_field_is_missing() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.description, Patch::Missing);
    }

    #[test]
    fn explicit_null_is_null() {
        let body: Body = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(body.description, Patch::Null);
    }

    #[test]
    fn provided_value_is_value() {
        let body: Body = serde_json::from_str(r#"{"description": "notes"}"#).unwrap();
        assert_eq!(body.description, Patch::Value("notes".to_string()));
    }
}
