use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::restaurant::{DEFAULT_COLOR_SCHEME, NewRestaurant, UpdateRestaurant};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};
use crate::routes::empty_string_as_none;

/// Maximum length allowed for a restaurant name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum length allowed for a slug.
const SLUG_MAX_LEN: usize = 64;
const SLUG_MAX_LEN_VALIDATOR: u64 = SLUG_MAX_LEN as u64;

/// Maximum length allowed for a restaurant description.
const DESCRIPTION_MAX_LEN: usize = 2048;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Maximum length allowed for contact fields and the address.
const CONTACT_MAX_LEN: usize = 256;
const CONTACT_MAX_LEN_VALIDATOR: u64 = CONTACT_MAX_LEN as u64;

/// Result type returned by the restaurant form helpers.
pub type RestaurantFormResult<T> = Result<T, RestaurantFormError>;

/// Errors that can occur while processing restaurant forms.
#[derive(Debug, Error)]
pub enum RestaurantFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("restaurant name cannot be empty")]
    EmptyName,
    /// The provided or derived slug contains no usable characters.
    #[error("invalid slug `{value}`")]
    InvalidSlug { value: String },
}

/// Form payload emitted when submitting the "Add restaurant" form, and the
/// JSON body accepted by `POST /api/restaurants`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddRestaurantForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional explicit slug; derived from the name when absent.
    #[validate(length(max = SLUG_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub slug: Option<String>,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[validate(length(max = CONTACT_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub phone: Option<String>,
    #[validate(email)]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub email: Option<String>,
    #[validate(length(max = CONTACT_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub color_scheme: Option<String>,
}

impl AddRestaurantForm {
    /// Validates and sanitizes the payload into a domain `NewRestaurant`
    /// owned by `owner_id`.
    pub fn into_new_restaurant(self, owner_id: &str) -> RestaurantFormResult<NewRestaurant> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(RestaurantFormError::EmptyName);
        }

        let slug = match self.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(explicit) => {
                let slug = slugify(explicit);
                if slug.is_empty() {
                    return Err(RestaurantFormError::InvalidSlug {
                        value: explicit.to_string(),
                    });
                }
                slug
            }
            None => {
                let slug = slugify(&sanitized_name);
                if slug.is_empty() {
                    return Err(RestaurantFormError::InvalidSlug {
                        value: sanitized_name.clone(),
                    });
                }
                slug
            }
        };

        let mut new_restaurant = NewRestaurant::new(sanitized_name, slug, owner_id);

        if let Some(description) = optional_multiline(self.description) {
            new_restaurant = new_restaurant.with_description(description);
        }
        if let Some(phone) = optional_inline(self.phone) {
            new_restaurant = new_restaurant.with_phone(phone);
        }
        if let Some(email) = optional_inline(self.email) {
            new_restaurant = new_restaurant.with_email(email);
        }
        if let Some(address) = optional_inline(self.address) {
            new_restaurant = new_restaurant.with_address(address);
        }
        if let Some(color_scheme) = optional_inline(self.color_scheme) {
            new_restaurant = new_restaurant.with_color_scheme(color_scheme.to_lowercase());
        }

        Ok(new_restaurant)
    }
}

/// Normalized payload produced by the "Edit restaurant" form.
#[derive(Debug)]
pub struct EditRestaurantPayload {
    pub restaurant_id: i32,
    pub update: UpdateRestaurant,
}

/// Form payload emitted when saving the restaurant settings form.
#[derive(Debug, Deserialize, Validate)]
pub struct EditRestaurantForm {
    #[validate(range(min = 1))]
    pub restaurant_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[validate(length(max = CONTACT_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub phone: Option<String>,
    #[validate(email)]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub email: Option<String>,
    #[validate(length(max = CONTACT_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub color_scheme: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

impl EditRestaurantForm {
    /// Validates and sanitizes the payload into a domain `UpdateRestaurant`.
    pub fn into_update_restaurant(self) -> RestaurantFormResult<EditRestaurantPayload> {
        self.validate()?;

        let EditRestaurantForm {
            restaurant_id,
            name,
            description,
            phone,
            email,
            address,
            color_scheme,
            is_active,
        } = self;

        let name = {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(RestaurantFormError::EmptyName);
            }
            sanitized
        };

        let color_scheme = optional_inline(color_scheme)
            .map(|value| value.to_lowercase())
            .unwrap_or_else(|| DEFAULT_COLOR_SCHEME.to_string());

        let update = UpdateRestaurant::new(
            name,
            optional_multiline(description),
            optional_inline(phone),
            optional_inline(email),
            optional_inline(address),
            color_scheme,
            is_active,
        );

        Ok(EditRestaurantPayload {
            restaurant_id,
            update,
        })
    }
}

/// Derive a URL-safe slug: lowercase alphanumeric runs joined by single
/// dashes, everything else dropped.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut previous_dash = false;

    for ch in input.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            previous_dash = false;
        } else if !previous_dash && !slug.is_empty() {
            slug.push('-');
            previous_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

fn optional_inline(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(sanitize_inline_text)
        .filter(|text| !text.is_empty())
}

fn optional_multiline(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(sanitize_multiline_text)
        .filter(|text| !text.is_empty())
}
