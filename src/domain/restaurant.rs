use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Default accent color applied to new restaurants.
pub const DEFAULT_COLOR_SCHEME: &str = "orange";

/// Domain representation of a restaurant managed through the dashboard.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Restaurant {
    /// Unique identifier of the restaurant.
    pub id: i32,
    /// Display name shown on the public menu.
    pub name: String,
    /// URL-safe unique identifier used in public menu links and QR codes.
    pub slug: String,
    /// Optional blurb shown under the restaurant name.
    pub description: Option<String>,
    /// Optional contact phone number.
    pub phone: Option<String>,
    /// Optional contact email address.
    pub email: Option<String>,
    /// Optional street address.
    pub address: Option<String>,
    /// Accent color applied to the public menu page.
    pub color_scheme: String,
    /// Inactive restaurants are hidden from the public menu.
    pub is_active: bool,
    /// Identity of the owning dashboard user.
    pub owner_id: String,
    /// Timestamp for when the record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new restaurant.
#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub color_scheme: String,
    pub owner_id: String,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewRestaurant {
    /// Build a new restaurant payload with the supplied details and current timestamp.
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            description: None,
            phone: None,
            email: None,
            address: None,
            color_scheme: DEFAULT_COLOR_SCHEME.to_string(),
            owner_id: owner_id.into(),
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_color_scheme(mut self, color_scheme: impl Into<String>) -> Self {
        self.color_scheme = color_scheme.into();
        self
    }
}

/// Full-row patch applied when saving the restaurant settings form.
#[derive(Debug, Clone)]
pub struct UpdateRestaurant {
    pub name: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub color_scheme: String,
    pub is_active: bool,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateRestaurant {
    pub fn new(
        name: String,
        description: Option<String>,
        phone: Option<String>,
        email: Option<String>,
        address: Option<String>,
        color_scheme: String,
        is_active: bool,
    ) -> Self {
        Self {
            name,
            description,
            phone,
            email,
            address,
            color_scheme,
            is_active,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list restaurants.
#[derive(Debug, Clone)]
pub struct RestaurantListQuery {
    /// Restrict the results to restaurants owned by this identity.
    pub owner_id: Option<String>,
    /// Whether deactivated restaurants should be included.
    pub include_inactive: bool,
    /// Optional case-insensitive substring search on name and description.
    pub search: Option<String>,
    /// Optional pagination window.
    pub pagination: Option<Pagination>,
}

impl RestaurantListQuery {
    pub fn new() -> Self {
        Self {
            owner_id: None,
            include_inactive: false,
            search: None,
            pagination: None,
        }
    }

    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    pub fn include_inactive(mut self) -> Self {
        self.include_inactive = true;
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

impl Default for RestaurantListQuery {
    fn default() -> Self {
        Self::new()
    }
}
