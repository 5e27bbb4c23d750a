use std::io::{Cursor, Read, Seek};

use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use chrono::Local;
use csv::{StringRecord, Trim};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::cart::parse_price_cents;
use crate::domain::category::MenuCategory;
use crate::domain::item::{NewMenuItem, UpdateMenuItem};
use crate::forms::{sanitize_inline_text, sanitize_multiline_text};
use crate::routes::empty_string_as_none;

/// Maximum length allowed for an item name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum length allowed for an item description.
const DESCRIPTION_MAX_LEN: usize = 2048;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Result type returned by the menu item form helpers.
pub type ItemFormResult<T> = Result<T, ItemFormError>;

/// Errors that can occur while processing menu item forms and uploads.
#[derive(Debug, Error)]
pub enum ItemFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("item name cannot be empty")]
    EmptyName,
    /// The provided price is negative or not a number.
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    /// The uploaded CSV is missing required columns.
    #[error("upload is missing the required `name`, `category` or `price` headers")]
    MissingRequiredHeaders,
    /// A CSV row did not include an item name.
    #[error("row {row} is missing an item name")]
    UploadMissingName { row: usize },
    /// A CSV row contained an unparsable price.
    #[error("row {row} has invalid price `{value}`")]
    UploadInvalidPrice { row: usize, value: String },
    /// A CSV row referenced a category the restaurant does not have.
    #[error("row {row} references unknown category `{value}`")]
    UploadUnknownCategory { row: usize, value: String },
    /// The uploaded CSV did not contain any usable items.
    #[error("upload contains no items")]
    EmptyUpload,
    /// CSV parsing failures.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Form payload emitted when submitting the "Add item" form, and the JSON
/// body accepted by `POST /api/menu-items`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddMenuItemForm {
    #[validate(range(min = 1))]
    pub restaurant_id: i32,
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    /// Price in display currency units; converted to the smallest unit.
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default)]
    pub is_spicy: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl AddMenuItemForm {
    /// Validates and sanitizes the payload into a domain `NewMenuItem`.
    pub fn into_new_menu_item(self) -> ItemFormResult<NewMenuItem> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(ItemFormError::EmptyName);
        }

        let price_cents = price_to_cents(self.price)?;

        let sanitized_description = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        let mut new_item = NewMenuItem::new(
            self.restaurant_id,
            self.category_id,
            sanitized_name,
            price_cents,
        )
        .veg(self.is_veg)
        .spicy(self.is_spicy)
        .featured(self.is_featured);

        if let Some(description) = sanitized_description {
            new_item = new_item.with_description(description);
        }
        if let Some(display_order) = self.display_order {
            new_item = new_item.with_display_order(display_order);
        }

        Ok(new_item)
    }
}

/// Normalized payload produced by the "Edit item" form.
#[derive(Debug)]
pub struct EditMenuItemPayload {
    pub item_id: i32,
    pub restaurant_id: i32,
    /// Patch data that should be applied to the item.
    pub update: UpdateMenuItem,
}

/// Form payload emitted when editing an existing menu item.
#[derive(Debug, Deserialize, Validate)]
pub struct EditMenuItemForm {
    #[validate(range(min = 1))]
    pub item_id: i32,
    #[validate(range(min = 1))]
    pub restaurant_id: i32,
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    /// Price in display currency units; converted to the smallest unit.
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default)]
    pub is_spicy: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_available: bool,
    #[serde(default)]
    pub display_order: i32,
}

impl EditMenuItemForm {
    /// Validates and sanitizes the payload into a domain `UpdateMenuItem`.
    pub fn into_update_menu_item(self) -> ItemFormResult<EditMenuItemPayload> {
        self.validate()?;

        let name = {
            let sanitized = sanitize_inline_text(&self.name);
            if sanitized.is_empty() {
                return Err(ItemFormError::EmptyName);
            }
            sanitized
        };

        let price_cents = price_to_cents(self.price)?;

        let description = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());

        let update = UpdateMenuItem {
            category_id: self.category_id,
            name,
            description,
            price_cents,
            is_veg: self.is_veg,
            is_spicy: self.is_spicy,
            is_featured: self.is_featured,
            is_available: self.is_available,
            display_order: self.display_order,
            updated_at: Local::now().naive_utc(),
        };

        Ok(EditMenuItemPayload {
            item_id: self.item_id,
            restaurant_id: self.restaurant_id,
            update,
        })
    }
}

/// Multipart request carrying a CSV of menu items for one restaurant.
#[derive(MultipartForm)]
pub struct UploadMenuItemsMultipart {
    /// Restaurant the uploaded items belong to.
    pub restaurant_id: Text<i32>,
    #[multipart(limit = "10MB")]
    /// Uploaded CSV file containing menu item data.
    pub csv: TempFile,
}

impl UploadMenuItemsMultipart {
    /// Split the multipart payload into the target restaurant id and a
    /// parseable upload form.
    pub fn into_parts(mut self) -> std::io::Result<(i32, UploadMenuItemsForm)> {
        self.csv.file.rewind()?;
        let mut bytes = Vec::new();
        self.csv.file.read_to_end(&mut bytes)?;

        let restaurant_id = self.restaurant_id.0;
        Ok((
            restaurant_id,
            UploadMenuItemsForm::new(self.csv.file_name, bytes),
        ))
    }
}

/// Byte-backed upload payload for bulk menu item creation.
#[derive(Debug)]
pub struct UploadMenuItemsForm {
    /// Optional filename provided by the client.
    pub file_name: Option<String>,
    /// Raw CSV bytes received from the upload.
    pub bytes: Vec<u8>,
}

impl UploadMenuItemsForm {
    /// Construct a new upload payload from the multipart data.
    pub fn new(file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name, bytes }
    }

    /// Parse the uploaded CSV into domain `NewMenuItem` values, resolving
    /// category names (case-insensitive) against the restaurant's
    /// categories. Prices accept both plain decimals and currency-prefixed
    /// labels ("350", "₹350", "3.50").
    pub fn into_new_menu_items(
        self,
        restaurant_id: i32,
        categories: &[MenuCategory],
    ) -> ItemFormResult<Vec<NewMenuItem>> {
        let UploadMenuItemsForm { bytes, .. } = self;
        let cursor = Cursor::new(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(cursor);

        let headers = reader.headers()?.clone();
        let indexes = locate_item_headers(&headers);

        let (Some(name_index), Some(category_index), Some(price_index)) =
            (indexes.name_index, indexes.category_index, indexes.price_index)
        else {
            return Err(ItemFormError::MissingRequiredHeaders);
        };

        let mut items = Vec::new();

        for (index, row) in reader.records().enumerate() {
            let row_number = index + 2; // account for header row
            let record = row?;

            let sanitized_name =
                sanitize_inline_text(record.get(name_index).unwrap_or_default());
            if sanitized_name.is_empty() {
                return Err(ItemFormError::UploadMissingName { row: row_number });
            }

            let category_raw = record.get(category_index).unwrap_or_default().trim();
            let category = categories
                .iter()
                .find(|category| category.name.eq_ignore_ascii_case(category_raw))
                .ok_or_else(|| ItemFormError::UploadUnknownCategory {
                    row: row_number,
                    value: category_raw.to_string(),
                })?;

            let price_raw = record.get(price_index).unwrap_or_default().trim();
            let price_cents =
                parse_price_cents(price_raw).ok_or_else(|| ItemFormError::UploadInvalidPrice {
                    row: row_number,
                    value: price_raw.to_string(),
                })?;

            let description = indexes
                .description_index
                .and_then(|idx| record.get(idx))
                .map(sanitize_multiline_text)
                .filter(|value| !value.is_empty());

            let mut item =
                NewMenuItem::new(restaurant_id, category.id, sanitized_name, price_cents)
                    .veg(flag_value(&record, indexes.veg_index))
                    .spicy(flag_value(&record, indexes.spicy_index))
                    .featured(flag_value(&record, indexes.featured_index))
                    .with_display_order(items.len() as i32);

            if let Some(description) = description {
                item = item.with_description(description);
            }

            items.push(item);
        }

        if items.is_empty() {
            return Err(ItemFormError::EmptyUpload);
        }

        Ok(items)
    }
}

/// Convert a display-unit price into the smallest currency unit.
fn price_to_cents(price: f64) -> ItemFormResult<i64> {
    if !price.is_finite() || price < 0.0 {
        return Err(ItemFormError::InvalidPrice {
            value: price.to_string(),
        });
    }

    Ok((price * 100.0).round() as i64)
}

struct ItemHeaderIndexes {
    name_index: Option<usize>,
    category_index: Option<usize>,
    price_index: Option<usize>,
    description_index: Option<usize>,
    veg_index: Option<usize>,
    spicy_index: Option<usize>,
    featured_index: Option<usize>,
}

fn locate_item_headers(headers: &StringRecord) -> ItemHeaderIndexes {
    ItemHeaderIndexes {
        name_index: locate_header(headers, "name"),
        category_index: locate_header(headers, "category"),
        price_index: locate_header(headers, "price"),
        description_index: locate_header(headers, "description"),
        veg_index: locate_header(headers, "veg"),
        spicy_index: locate_header(headers, "spicy"),
        featured_index: locate_header(headers, "featured"),
    }
}

fn locate_header(headers: &StringRecord, expected: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(expected))
}

fn flag_value(record: &StringRecord, index: Option<usize>) -> bool {
    index
        .and_then(|idx| record.get(idx))
        .map(|value| {
            let value = value.trim();
            value.eq_ignore_ascii_case("true")
                || value.eq_ignore_ascii_case("yes")
                || value.eq_ignore_ascii_case("y")
                || value == "1"
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn sample_category(id: i32, name: &str) -> MenuCategory {
        MenuCategory {
            id,
            restaurant_id: 3,
            name: name.to_string(),
            description: None,
            display_order: 0,
            is_active: true,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn add_item_form_converts_price_to_cents() {
        let form = AddMenuItemForm {
            restaurant_id: 3,
            category_id: 10,
            name: "  Fish   Curry ".to_string(),
            description: Some(" House specialty. ".to_string()),
            price: 350.0,
            is_veg: false,
            is_spicy: true,
            is_featured: false,
            display_order: Some(2),
        };

        let new_item = form.into_new_menu_item().expect("expected success");

        assert_eq!(new_item.name, "Fish Curry");
        assert_eq!(new_item.price_cents, 35000);
        assert_eq!(new_item.description.as_deref(), Some("House specialty."));
        assert!(new_item.is_spicy);
        assert_eq!(new_item.display_order, 2);
    }

    #[test]
    fn add_item_form_rounds_fractional_prices() {
        let form = AddMenuItemForm {
            restaurant_id: 3,
            category_id: 10,
            name: "Samosa".to_string(),
            description: None,
            price: 99.99,
            is_veg: true,
            is_spicy: false,
            is_featured: false,
            display_order: None,
        };

        let new_item = form.into_new_menu_item().expect("expected success");

        assert_eq!(new_item.price_cents, 9999);
    }

    #[test]
    fn add_item_form_rejects_negative_price() {
        let form = AddMenuItemForm {
            restaurant_id: 3,
            category_id: 10,
            name: "Samosa".to_string(),
            description: None,
            price: -1.0,
            is_veg: true,
            is_spicy: false,
            is_featured: false,
            display_order: None,
        };

        let result = form.into_new_menu_item();

        assert!(matches!(result, Err(ItemFormError::Validation(_))));
    }

    #[test]
    fn add_item_form_rejects_empty_name() {
        let form = AddMenuItemForm {
            restaurant_id: 3,
            category_id: 10,
            name: "   ".to_string(),
            description: None,
            price: 10.0,
            is_veg: false,
            is_spicy: false,
            is_featured: false,
            display_order: None,
        };

        let result = form.into_new_menu_item();

        assert!(matches!(result, Err(ItemFormError::EmptyName)));
    }

    #[test]
    fn upload_form_converts_rows() {
        let csv = b"name,category,price,veg,spicy,description\n\
Fish Curry,Main Course,\xe2\x82\xb9350,no,yes,House specialty\n\
Samosa,Starters,60,yes,no,\n"
            .to_vec();
        let categories = vec![
            sample_category(10, "Main Course"),
            sample_category(11, "Starters"),
        ];
        let form = UploadMenuItemsForm::new(Some("menu.csv".into()), csv);

        let items = form
            .into_new_menu_items(3, &categories)
            .expect("expected upload to succeed");

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Fish Curry");
        assert_eq!(items[0].category_id, 10);
        assert_eq!(items[0].price_cents, 35000);
        assert!(items[0].is_spicy);
        assert!(!items[0].is_veg);
        assert_eq!(items[0].description.as_deref(), Some("House specialty"));

        assert_eq!(items[1].name, "Samosa");
        assert_eq!(items[1].category_id, 11);
        assert_eq!(items[1].price_cents, 6000);
        assert!(items[1].is_veg);
        assert_eq!(items[1].display_order, 1);
    }

    #[test]
    fn upload_form_rejects_missing_headers() {
        let csv = b"name,price\nFish Curry,350\n".to_vec();
        let form = UploadMenuItemsForm::new(None, csv);

        let result = form.into_new_menu_items(3, &[]);

        assert!(matches!(result, Err(ItemFormError::MissingRequiredHeaders)));
    }

    #[test]
    fn upload_form_rejects_unknown_category() {
        let csv = b"name,category,price\nFish Curry,Unknown,350\n".to_vec();
        let categories = vec![sample_category(10, "Main Course")];
        let form = UploadMenuItemsForm::new(None, csv);

        let result = form.into_new_menu_items(3, &categories);

        assert!(matches!(
            result,
            Err(ItemFormError::UploadUnknownCategory { row: 2, value }) if value == "Unknown"
        ));
    }

    #[test]
    fn upload_form_rejects_invalid_price() {
        let csv = b"name,category,price\nFish Curry,Main Course,free\n".to_vec();
        let categories = vec![sample_category(10, "Main Course")];
        let form = UploadMenuItemsForm::new(None, csv);

        let result = form.into_new_menu_items(3, &categories);

        assert!(matches!(
            result,
            Err(ItemFormError::UploadInvalidPrice { row: 2, value }) if value == "free"
        ));
    }

    #[test]
    fn upload_form_rejects_empty_upload() {
        let csv = b"name,category,price\n".to_vec();
        let form = UploadMenuItemsForm::new(None, csv);

        let result = form.into_new_menu_items(3, &[]);

        assert!(matches!(result, Err(ItemFormError::EmptyUpload)));
    }

    #[test]
    fn edit_item_form_builds_payload() {
        let form = EditMenuItemForm {
            item_id: 7,
            restaurant_id: 3,
            category_id: 11,
            name: " Fish Curry ".to_string(),
            description: Some("  ".to_string()),
            price: 375.5,
            is_veg: false,
            is_spicy: true,
            is_featured: true,
            is_available: false,
            display_order: 4,
        };

        let payload = form
            .into_update_menu_item()
            .expect("expected payload conversion to succeed");

        assert_eq!(payload.item_id, 7);
        assert_eq!(payload.restaurant_id, 3);
        let update = payload.update;
        assert_eq!(update.category_id, 11);
        assert_eq!(update.name, "Fish Curry");
        assert!(update.description.is_none());
        assert_eq!(update.price_cents, 37550);
        assert!(!update.is_available);
        assert_eq!(update.display_order, 4);
    }
}
