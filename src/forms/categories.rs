use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};
use crate::routes::empty_string_as_none;

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum length allowed for a category description.
const DESCRIPTION_MAX_LEN: usize = 2048;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("category name cannot be empty")]
    EmptyName,
}

/// Form payload emitted when submitting the "Add category" form, and the
/// JSON body accepted by `POST /api/menu-categories`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    /// Restaurant the category belongs to.
    #[validate(range(min = 1))]
    pub restaurant_id: i32,
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional description for the category.
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    /// Optional render position; defaults to 0.
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        let sanitized_description = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        let mut new_category = NewCategory::new(self.restaurant_id, sanitized_name);
        if let Some(description) = sanitized_description {
            new_category = new_category.with_description(description);
        }
        if let Some(display_order) = self.display_order {
            new_category = new_category.with_display_order(display_order);
        }

        Ok(new_category)
    }
}

/// Normalized payload produced by the "Edit category" form.
#[derive(Debug)]
pub struct EditCategoryPayload {
    pub category_id: i32,
    pub restaurant_id: i32,
    /// Patch data that should be applied to the category.
    pub update: UpdateCategory,
}

/// Form payload emitted when editing an existing category.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(range(min = 1))]
    pub restaurant_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub is_active: bool,
}

impl EditCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> CategoryFormResult<EditCategoryPayload> {
        self.validate()?;

        let EditCategoryForm {
            category_id,
            restaurant_id,
            name,
            description,
            display_order,
            is_active,
        } = self;

        let name = {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(CategoryFormError::EmptyName);
            }
            sanitized
        };

        let description = description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        let update = UpdateCategory::new(name, description, display_order, is_active);

        Ok(EditCategoryPayload {
            category_id,
            restaurant_id,
            update,
        })
    }
}
