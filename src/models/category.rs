use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    MenuCategory as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::menu_categories)]
pub struct MenuCategory {
    pub id: i32,
    pub restaurant_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::menu_categories)]
pub struct NewCategory<'a> {
    pub restaurant_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub display_order: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::menu_categories)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCategory<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub display_order: i32,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl From<MenuCategory> for DomainCategory {
    fn from(value: MenuCategory) -> Self {
        Self {
            id: value.id,
            restaurant_id: value.restaurant_id,
            name: value.name,
            description: value.description,
            display_order: value.display_order,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewCategory> for NewCategory<'a> {
    fn from(value: &'a DomainNewCategory) -> Self {
        Self {
            restaurant_id: value.restaurant_id,
            name: value.name.as_str(),
            description: value.description.as_deref(),
            display_order: value.display_order,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateCategory> for UpdateCategory<'a> {
    fn from(value: &'a DomainUpdateCategory) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_deref(),
            display_order: value.display_order,
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
