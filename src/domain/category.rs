//! Category domain entity
//!
//! Categories group tasks by type or context (Work, Personal, Shopping) and
//! carry an optional display color.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DomainError, Patch};
use crate::validation::{FieldError, Validator};

const NAME_MAX_CHARS: usize = 30;

/// Display color for a category, each with a fixed hex code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskColor {
    Green,
    White,
    Red,
    Yellow,
}

impl TaskColor {
    pub fn hex_code(&self) -> &'static str {
        match self {
            Self::Green => "#28a745",
            Self::White => "#ffffff",
            Self::Red => "#dc3545",
            Self::Yellow => "#ffc107",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::White => "white",
            Self::Red => "red",
            Self::Yellow => "yellow",
        }
    }

    /// Unknown stored values decode to None rather than failing the read
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "green" => Some(Self::Green),
            "white" => Some(Self::White),
            "red" => Some(Self::Red),
            "yellow" => Some(Self::Yellow),
            _ => None,
        }
    }
}

/// Category entity
///
/// Invariant: `name` is always non-empty and at most 30 characters after
/// trimming.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// 0 until the store assigns an identity on insert
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<TaskColor>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating a category
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<TaskColor>,
}

impl CreateCategoryRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.ensure(!self.name.trim().is_empty(), "name", "Name is required")
            .ensure(
                self.name.trim().chars().count() <= NAME_MAX_CHARS,
                "name",
                "Name cannot exceed 30 characters",
            );
        v.finish()
    }
}

/// Request body for partially updating a category.
///
/// Presence-gated like the task update. Name and color cannot be cleared,
/// so a null for either is treated as not provided; a null description
/// clears the stored one. An unknown color value is rejected at
/// deserialization by the typed enum.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub color: Patch<TaskColor>,
}

impl UpdateCategoryRequest {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.ensure(
            self.name
                .value()
                .map_or(true, |n| n.trim().chars().count() <= NAME_MAX_CHARS),
            "name",
            "Name cannot exceed 30 characters",
        );
        v.finish()
    }
}

impl Category {
    /// Create a new, not-yet-persisted category with trimmed name and
    /// description.
    pub fn create(request: CreateCategoryRequest) -> Result<Self, DomainError> {
        let name = validated_name(&request.name)?;

        Ok(Self {
            id: 0,
            name,
            description: request.description.map(|d| d.trim().to_string()),
            color: request.color,
            created_at: Utc::now(),
            updated_at: None,
        })
    }

    /// Apply a partial update; `updated_at` is always refreshed.
    pub fn update(&mut self, request: UpdateCategoryRequest) -> Result<(), DomainError> {
        if let Patch::Value(name) = &request.name {
            self.name = validated_name(name)?;
        }

        match request.description {
            Patch::Value(description) => self.description = Some(description.trim().to_string()),
            Patch::Null => self.description = None,
            Patch::Missing => {}
        }

        if let Patch::Value(color) = request.color {
            self.color = Some(color);
        }

        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

fn validated_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::invalid_argument(
            "name",
            "Category name cannot be empty",
        ));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(DomainError::invalid_argument(
            "name",
            "Category name cannot exceed 30 characters",
        ));
    }
    Ok(name.to_string())
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<TaskColor>,
    pub color_hex: Option<&'static str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            color: c.color,
            color_hex: c.color.map(|color| color.hex_code()),
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(name: &str) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: name.to_string(),
            description: None,
            color: None,
        }
    }

    #[test]
    fn create_with_valid_request_succeeds() {
        let category = Category::create(CreateCategoryRequest {
            name: "Work".to_string(),
            description: Some("Work related tasks".to_string()),
            color: Some(TaskColor::Yellow),
        })
        .unwrap();

        assert_eq!(category.name, "Work");
        assert_eq!(category.description.as_deref(), Some("Work related tasks"));
        assert_eq!(category.color, Some(TaskColor::Yellow));
        assert!(category.updated_at.is_none());
    }

    #[test]
    fn create_trims_name() {
        let category = Category::create(create_request("  Personal  ")).unwrap();
        assert_eq!(category.name, "Personal");
    }

    #[test]
    fn create_with_blank_name_fails() {
        for name in ["", "   "] {
            let err = Category::create(create_request(name)).unwrap_err();
            assert_eq!(
                err,
                DomainError::invalid_argument("name", "Category name cannot be empty")
            );
        }
    }

    #[test]
    fn create_rejects_names_over_thirty_chars() {
        let err = Category::create(create_request(&"n".repeat(31))).unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_argument("name", "Category name cannot exceed 30 characters")
        );

        assert!(Category::create(create_request(&"n".repeat(30))).is_ok());
    }

    #[test]
    fn update_name_is_revalidated() {
        let mut category = Category::create(create_request("Original")).unwrap();

        let err = category
            .update(UpdateCategoryRequest {
                name: Patch::Value("  ".to_string()),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::invalid_argument("name", "Category name cannot be empty")
        );
        assert_eq!(category.name, "Original");
    }

    #[test]
    fn update_applies_provided_fields_and_refreshes_updated_at() {
        let mut category = Category::create(CreateCategoryRequest {
            name: "Original".to_string(),
            description: Some("Original description".to_string()),
            color: Some(TaskColor::Green),
        })
        .unwrap();

        category
            .update(UpdateCategoryRequest {
                name: Patch::Value("Renamed".to_string()),
                color: Patch::Value(TaskColor::Red),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(category.name, "Renamed");
        assert_eq!(category.color, Some(TaskColor::Red));
        assert_eq!(
            category.description.as_deref(),
            Some("Original description")
        );
        assert!(category.updated_at.is_some());
    }

    #[test]
    fn update_with_null_description_clears_it() {
        let mut category = Category::create(CreateCategoryRequest {
            name: "Shopping".to_string(),
            description: Some("to be removed".to_string()),
            color: None,
        })
        .unwrap();

        category
            .update(UpdateCategoryRequest {
                description: Patch::Null,
                ..Default::default()
            })
            .unwrap();

        assert!(category.description.is_none());
    }

    #[test]
    fn update_with_no_fields_still_refreshes_updated_at() {
        let mut category = Category::create(create_request("Work")).unwrap();
        category.update(UpdateCategoryRequest::default()).unwrap();
        assert!(category.updated_at.is_some());
    }

    #[test]
    fn color_hex_codes_are_fixed() {
        assert_eq!(TaskColor::Green.hex_code(), "#28a745");
        assert_eq!(TaskColor::White.hex_code(), "#ffffff");
        assert_eq!(TaskColor::Red.hex_code(), "#dc3545");
        assert_eq!(TaskColor::Yellow.hex_code(), "#ffc107");
    }

    #[test]
    fn color_round_trips_through_storage_form() {
        for color in [
            TaskColor::Green,
            TaskColor::White,
            TaskColor::Red,
            TaskColor::Yellow,
        ] {
            assert_eq!(TaskColor::from_str(color.as_str()), Some(color));
        }
        assert_eq!(TaskColor::from_str("purple"), None);
    }

    #[test]
    fn unknown_color_in_request_is_rejected() {
        let result: Result<UpdateCategoryRequest, _> =
            serde_json::from_str(r#"{"color": "purple"}"#);
        assert!(result.is_err());
    }
}
