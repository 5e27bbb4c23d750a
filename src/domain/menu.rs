use serde::Serialize;

use crate::domain::category::MenuCategory;
use crate::domain::item::MenuItem;
use crate::domain::restaurant::Restaurant;

/// A menu category together with the items listed under it.
///
/// Serializes with the category fields inlined so the JSON matches the
/// public `categories[].items[]` shape.
#[derive(Debug, Serialize, Clone)]
pub struct CategoryWithItems {
    #[serde(flatten)]
    pub category: MenuCategory,
    pub items: Vec<MenuItem>,
}

impl CategoryWithItems {
    pub fn new(category: MenuCategory) -> Self {
        Self {
            category,
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: impl Into<Vec<MenuItem>>) -> Self {
        self.items = items.into();
        self
    }
}

/// The full public menu of a restaurant: the restaurant itself plus its
/// categories in render order, each carrying its items.
#[derive(Debug, Serialize, Clone)]
pub struct RestaurantWithMenu {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub categories: Vec<CategoryWithItems>,
}
