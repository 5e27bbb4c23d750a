use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::restaurant::{
    NewRestaurant as DomainNewRestaurant, Restaurant as DomainRestaurant,
    UpdateRestaurant as DomainUpdateRestaurant,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::restaurants)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub color_scheme: String,
    pub is_active: bool,
    pub owner_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::restaurants)]
pub struct NewRestaurant<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub description: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
    pub color_scheme: &'a str,
    pub owner_id: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::restaurants)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateRestaurant<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
    pub address: Option<&'a str>,
    pub color_scheme: &'a str,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl From<Restaurant> for DomainRestaurant {
    fn from(value: Restaurant) -> Self {
        Self {
            id: value.id,
            name: value.name,
            slug: value.slug,
            description: value.description,
            phone: value.phone,
            email: value.email,
            address: value.address,
            color_scheme: value.color_scheme,
            is_active: value.is_active,
            owner_id: value.owner_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewRestaurant> for NewRestaurant<'a> {
    fn from(value: &'a DomainNewRestaurant) -> Self {
        Self {
            name: value.name.as_str(),
            slug: value.slug.as_str(),
            description: value.description.as_deref(),
            phone: value.phone.as_deref(),
            email: value.email.as_deref(),
            address: value.address.as_deref(),
            color_scheme: value.color_scheme.as_str(),
            owner_id: value.owner_id.as_str(),
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateRestaurant> for UpdateRestaurant<'a> {
    fn from(value: &'a DomainUpdateRestaurant) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_deref(),
            phone: value.phone.as_deref(),
            email: value.email.as_deref(),
            address: value.address.as_deref(),
            color_scheme: value.color_scheme.as_str(),
            is_active: value.is_active,
            updated_at: value.updated_at,
        }
    }
}
