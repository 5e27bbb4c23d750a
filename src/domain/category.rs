use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a menu category belonging to a restaurant.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MenuCategory {
    /// Unique identifier of the category.
    pub id: i32,
    /// Owning restaurant identifier.
    pub restaurant_id: i32,
    /// Human-readable name of the category.
    pub name: String,
    /// Optional description that expands upon the category name.
    pub description: Option<String>,
    /// Render position; ascending, ties broken by insertion order.
    pub display_order: i32,
    /// Inactive categories are hidden from the public menu.
    pub is_active: bool,
    /// Timestamp for when the record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category for a restaurant.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Owning restaurant identifier.
    pub restaurant_id: i32,
    /// Human-readable name of the category.
    pub name: String,
    /// Optional description that expands upon the category name.
    pub description: Option<String>,
    /// Render position; ascending, ties broken by insertion order.
    pub display_order: i32,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewCategory {
    /// Build a new category payload with the supplied details and current timestamp.
    pub fn new(restaurant_id: i32, name: impl Into<String>) -> Self {
        Self {
            restaurant_id,
            name: name.into(),
            description: None,
            display_order: 0,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }
}

/// Full-row patch applied when saving the category edit form.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    pub name: String,
    /// New description value; `None` clears the description.
    pub description: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateCategory {
    pub fn new(
        name: String,
        description: Option<String>,
        display_order: i32,
        is_active: bool,
    ) -> Self {
        Self {
            name,
            description,
            display_order,
            is_active,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list categories of a restaurant in render order.
#[derive(Debug, Clone)]
pub struct CategoryListQuery {
    /// Owning restaurant identifier.
    pub restaurant_id: i32,
    /// Whether inactive categories should be included in the results.
    pub include_inactive: bool,
    /// Optional pagination window.
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn new(restaurant_id: i32) -> Self {
        Self {
            restaurant_id,
            include_inactive: false,
            pagination: None,
        }
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
