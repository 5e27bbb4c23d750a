use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a dish on a restaurant menu.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MenuItem {
    /// Unique identifier of the item.
    pub id: i32,
    /// Owning restaurant identifier.
    pub restaurant_id: i32,
    /// Category the item is listed under; always a category of the same restaurant.
    pub category_id: i32,
    /// Human-readable name of the dish.
    pub name: String,
    /// Optional longer description shown to diners.
    pub description: Option<String>,
    /// Price in the smallest currency unit (for example cents).
    pub price_cents: i64,
    /// Vegetarian marker.
    pub is_veg: bool,
    /// Spicy marker.
    pub is_spicy: bool,
    /// Featured items are highlighted on the public menu.
    pub is_featured: bool,
    /// Unavailable items are hidden from the public menu.
    pub is_available: bool,
    /// Render position; ascending, ties broken by insertion order.
    pub display_order: i32,
    /// Timestamp for when the record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new menu item.
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub restaurant_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub is_veg: bool,
    pub is_spicy: bool,
    pub is_featured: bool,
    pub display_order: i32,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewMenuItem {
    /// Build a new menu item payload with the supplied details and current timestamp.
    pub fn new(
        restaurant_id: i32,
        category_id: i32,
        name: impl Into<String>,
        price_cents: i64,
    ) -> Self {
        Self {
            restaurant_id,
            category_id,
            name: name.into(),
            description: None,
            price_cents,
            is_veg: false,
            is_spicy: false,
            is_featured: false,
            display_order: 0,
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn veg(mut self, is_veg: bool) -> Self {
        self.is_veg = is_veg;
        self
    }

    pub fn spicy(mut self, is_spicy: bool) -> Self {
        self.is_spicy = is_spicy;
        self
    }

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = is_featured;
        self
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }
}

/// Full-row patch applied when saving the item edit form.
#[derive(Debug, Clone)]
pub struct UpdateMenuItem {
    /// Category the item moves to; must belong to the same restaurant.
    pub category_id: i32,
    pub name: String,
    /// New description value; `None` clears the description.
    pub description: Option<String>,
    pub price_cents: i64,
    pub is_veg: bool,
    pub is_spicy: bool,
    pub is_featured: bool,
    pub is_available: bool,
    pub display_order: i32,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

/// Query definition used to list menu items of a restaurant in render order.
#[derive(Debug, Clone)]
pub struct MenuItemListQuery {
    /// Owning restaurant identifier.
    pub restaurant_id: i32,
    /// Optional filter restricting the results to a single category.
    pub category_id: Option<i32>,
    /// Whether unavailable items should be included in the results.
    pub include_unavailable: bool,
    /// Optional case-insensitive substring search on name and description.
    pub search: Option<String>,
    /// Optional pagination window.
    pub pagination: Option<Pagination>,
}

impl MenuItemListQuery {
    pub fn new(restaurant_id: i32) -> Self {
        Self {
            restaurant_id,
            category_id: None,
            include_unavailable: false,
            search: None,
            pagination: None,
        }
    }

    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn include_unavailable(mut self) -> Self {
        self.include_unavailable = true;
        self
    }

    pub fn search(mut self, value: impl Into<String>) -> Self {
        self.search = Some(value.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
