//! Request validation
//!
//! Accumulates field-level errors so a response can report every invalid
//! field at once, instead of failing on the first one.

use serde::Serialize;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Accumulating validator for request DTOs
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field` unless `valid` holds
    pub fn ensure(&mut self, valid: bool, field: &str, message: &str) -> &mut Self {
        if !valid {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_when_all_checks_hold() {
        let mut v = Validator::new();
        v.ensure(true, "title", "Title is required");
        assert!(v.finish().is_ok());
    }

    #[test]
    fn collects_every_failed_check() {
        let mut v = Validator::new();
        v.ensure(false, "title", "Title is required")
            .ensure(true, "description", "Description cannot exceed 500 characters")
            .ensure(false, "category_id", "Category ID must be greater than 0");

        let errors = v.finish().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "title");
        assert_eq!(errors[1].field, "category_id");
    }
}
