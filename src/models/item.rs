use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::item::{
    MenuItem as DomainMenuItem, NewMenuItem as DomainNewMenuItem,
    UpdateMenuItem as DomainUpdateMenuItem,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::menu_items)]
pub struct MenuItem {
    pub id: i32,
    pub restaurant_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub is_veg: bool,
    pub is_spicy: bool,
    pub is_featured: bool,
    pub is_available: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::menu_items)]
pub struct NewMenuItem<'a> {
    pub restaurant_id: i32,
    pub category_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i64,
    pub is_veg: bool,
    pub is_spicy: bool,
    pub is_featured: bool,
    pub display_order: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::menu_items)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateMenuItem<'a> {
    pub category_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i64,
    pub is_veg: bool,
    pub is_spicy: bool,
    pub is_featured: bool,
    pub is_available: bool,
    pub display_order: i32,
    pub updated_at: NaiveDateTime,
}

impl From<MenuItem> for DomainMenuItem {
    fn from(value: MenuItem) -> Self {
        Self {
            id: value.id,
            restaurant_id: value.restaurant_id,
            category_id: value.category_id,
            name: value.name,
            description: value.description,
            price_cents: value.price_cents,
            is_veg: value.is_veg,
            is_spicy: value.is_spicy,
            is_featured: value.is_featured,
            is_available: value.is_available,
            display_order: value.display_order,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewMenuItem> for NewMenuItem<'a> {
    fn from(value: &'a DomainNewMenuItem) -> Self {
        Self {
            restaurant_id: value.restaurant_id,
            category_id: value.category_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            price_cents: value.price_cents,
            is_veg: value.is_veg,
            is_spicy: value.is_spicy,
            is_featured: value.is_featured,
            display_order: value.display_order,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateMenuItem> for UpdateMenuItem<'a> {
    fn from(value: &'a DomainUpdateMenuItem) -> Self {
        Self {
            category_id: value.category_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            price_cents: value.price_cents,
            is_veg: value.is_veg,
            is_spicy: value.is_spicy,
            is_featured: value.is_featured,
            is_available: value.is_available,
            display_order: value.display_order,
            updated_at: value.updated_at,
        }
    }
}
