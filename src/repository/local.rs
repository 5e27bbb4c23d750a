use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Local;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::DEMO_OWNER_ID;
use crate::domain::cart::parse_price_cents;
use crate::domain::category::{CategoryListQuery, MenuCategory, NewCategory, UpdateCategory};
use crate::domain::item::{MenuItem, MenuItemListQuery, NewMenuItem, UpdateMenuItem};
use crate::domain::restaurant::{
    NewRestaurant, Restaurant, RestaurantListQuery, UpdateRestaurant,
};
use crate::pagination::Pagination;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CategoryReader, CategoryWriter, MenuItemReader, MenuItemWriter, RestaurantReader,
    RestaurantWriter,
};

/// Storage key for the restaurants collection.
const RESTAURANTS_KEY: &str = "menufy_restaurants";
/// Storage key for the menu categories collection.
const CATEGORIES_KEY: &str = "menufy_categories";
/// Storage key for the menu items collection.
const ITEMS_KEY: &str = "menufy_items";

#[derive(Clone)]
/// Local persistence adapter: three named collections serialized as JSON
/// files under a data directory. Used in demo mode and as the fallback
/// target when the database backend fails.
///
/// Identifiers are synthetic and monotonic per collection; a missing or
/// corrupt collection file reads as empty so the UI keeps functioning.
/// There is no cross-process coordination: concurrent writers outside this
/// process follow last-write-wins.
pub struct LocalRepository {
    data_dir: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl LocalRepository {
    /// Create an adapter persisting its collections under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    fn collection_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }

    /// Populate the store with a sample restaurant so a fresh demo-mode
    /// deployment has something to show. No-op when restaurants exist.
    pub fn seed_demo_data(&self) -> RepositoryResult<()> {
        let (total, _) = self.list_restaurants(RestaurantListQuery::new().include_inactive())?;
        if total > 0 {
            return Ok(());
        }

        let restaurant = self.create_restaurant(
            &NewRestaurant::new("Spice Garden", "spice-garden", DEMO_OWNER_ID)
                .with_description("Authentic Indian cuisine, straight from the tandoor.")
                .with_phone("+91 98765 43210")
                .with_address("12 MG Road, Bengaluru"),
        )?;

        let mains = self.create_category(
            &NewCategory::new(restaurant.id, "Main Course").with_display_order(0),
        )?;
        let starters = self.create_category(
            &NewCategory::new(restaurant.id, "Starters").with_display_order(1),
        )?;
        let desserts = self.create_category(
            &NewCategory::new(restaurant.id, "Desserts").with_display_order(2),
        )?;

        let seed_items = [
            (&mains, "Fish Curry", "₹350", false, true, true, 0),
            (&mains, "Paneer Butter Masala", "₹280", true, false, false, 1),
            (&starters, "Samosa", "₹60", true, false, false, 0),
            (&starters, "Chicken 65", "₹220", false, true, false, 1),
            (&desserts, "Gulab Jamun", "₹90", true, false, false, 0),
        ];

        for (category, name, price_label, is_veg, is_spicy, is_featured, display_order) in
            seed_items
        {
            let price_cents = parse_price_cents(price_label).ok_or_else(|| {
                RepositoryError::Storage(format!("invalid seed price `{price_label}`"))
            })?;
            self.create_menu_item(
                &NewMenuItem::new(restaurant.id, category.id, name, price_cents)
                    .veg(is_veg)
                    .spicy(is_spicy)
                    .featured(is_featured)
                    .with_display_order(display_order),
            )?;
        }

        log::info!("seeded demo data for restaurant `{}`", restaurant.slug);
        Ok(())
    }

    /// Read a whole collection. A missing or unreadable file and corrupt
    /// JSON both degrade to an empty collection.
    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let path = self.collection_path(key);
        read_collection_file(&path)
    }

    fn write_collection<T: Serialize>(&self, key: &str, records: &[T]) -> RepositoryResult<()> {
        fs::create_dir_all(&self.data_dir)?;
        let serialized = serde_json::to_string_pretty(records)?;
        fs::write(self.collection_path(key), serialized)?;
        Ok(())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_collection_file<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            log::warn!("failed to read {}: {err}", path.display());
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(err) => {
            log::warn!("corrupt collection {}: {err}", path.display());
            Vec::new()
        }
    }
}

/// Next synthetic identifier for a collection: one past the largest id seen.
fn next_id(existing: impl Iterator<Item = i32>) -> i32 {
    existing.max().unwrap_or(0) + 1
}

fn paginate<T>(records: Vec<T>, pagination: &Option<Pagination>) -> Vec<T> {
    match pagination {
        None => records,
        Some(window) => {
            let page = window.page.max(1);
            let offset = (page - 1) * window.per_page;
            records
                .into_iter()
                .skip(offset)
                .take(window.per_page)
                .collect()
        }
    }
}

fn matches_search(term: &str, name: &str, description: Option<&str>) -> bool {
    let term = term.to_lowercase();
    name.to_lowercase().contains(&term)
        || description
            .map(|text| text.to_lowercase().contains(&term))
            .unwrap_or(false)
}

impl RestaurantReader for LocalRepository {
    fn get_restaurant_by_id(&self, id: i32) -> RepositoryResult<Option<Restaurant>> {
        let _guard = self.guard();
        let restaurants: Vec<Restaurant> = self.read_collection(RESTAURANTS_KEY);
        Ok(restaurants.into_iter().find(|record| record.id == id))
    }

    fn get_restaurant_by_slug(&self, slug: &str) -> RepositoryResult<Option<Restaurant>> {
        let _guard = self.guard();
        let restaurants: Vec<Restaurant> = self.read_collection(RESTAURANTS_KEY);
        Ok(restaurants
            .into_iter()
            .find(|record| record.slug == slug && record.is_active))
    }

    fn list_restaurants(
        &self,
        query: RestaurantListQuery,
    ) -> RepositoryResult<(usize, Vec<Restaurant>)> {
        let _guard = self.guard();
        let restaurants: Vec<Restaurant> = self.read_collection(RESTAURANTS_KEY);

        let mut matching: Vec<Restaurant> = restaurants
            .into_iter()
            .filter(|record| {
                query
                    .owner_id
                    .as_ref()
                    .is_none_or(|owner| &record.owner_id == owner)
            })
            .filter(|record| query.include_inactive || record.is_active)
            .filter(|record| {
                query.search.as_ref().is_none_or(|term| {
                    matches_search(term, &record.name, record.description.as_deref())
                })
            })
            .collect();

        matching.sort_by_key(|record| record.id);
        let total = matching.len();

        Ok((total, paginate(matching, &query.pagination)))
    }
}

impl RestaurantWriter for LocalRepository {
    fn create_restaurant(&self, new_restaurant: &NewRestaurant) -> RepositoryResult<Restaurant> {
        let _guard = self.guard();
        let mut restaurants: Vec<Restaurant> = self.read_collection(RESTAURANTS_KEY);

        if restaurants
            .iter()
            .any(|record| record.slug == new_restaurant.slug)
        {
            return Err(RepositoryError::Conflict);
        }

        let now = Local::now().naive_utc();
        let created = Restaurant {
            id: next_id(restaurants.iter().map(|record| record.id)),
            name: new_restaurant.name.clone(),
            slug: new_restaurant.slug.clone(),
            description: new_restaurant.description.clone(),
            phone: new_restaurant.phone.clone(),
            email: new_restaurant.email.clone(),
            address: new_restaurant.address.clone(),
            color_scheme: new_restaurant.color_scheme.clone(),
            is_active: true,
            owner_id: new_restaurant.owner_id.clone(),
            created_at: now,
            updated_at: now,
        };

        restaurants.push(created.clone());
        self.write_collection(RESTAURANTS_KEY, &restaurants)?;

        Ok(created)
    }

    fn update_restaurant(
        &self,
        restaurant_id: i32,
        owner_id: &str,
        updates: &UpdateRestaurant,
    ) -> RepositoryResult<Restaurant> {
        let _guard = self.guard();
        let mut restaurants: Vec<Restaurant> = self.read_collection(RESTAURANTS_KEY);

        let record = restaurants
            .iter_mut()
            .find(|record| record.id == restaurant_id && record.owner_id == owner_id)
            .ok_or(RepositoryError::NotFound)?;

        record.name = updates.name.clone();
        record.description = updates.description.clone();
        record.phone = updates.phone.clone();
        record.email = updates.email.clone();
        record.address = updates.address.clone();
        record.color_scheme = updates.color_scheme.clone();
        record.is_active = updates.is_active;
        record.updated_at = Local::now().naive_utc();
        let updated = record.clone();

        self.write_collection(RESTAURANTS_KEY, &restaurants)?;

        Ok(updated)
    }

    fn delete_restaurant(&self, restaurant_id: i32, owner_id: &str) -> RepositoryResult<()> {
        let _guard = self.guard();
        let mut restaurants: Vec<Restaurant> = self.read_collection(RESTAURANTS_KEY);

        let before = restaurants.len();
        restaurants.retain(|record| !(record.id == restaurant_id && record.owner_id == owner_id));

        if restaurants.len() == before {
            return Err(RepositoryError::NotFound);
        }

        self.write_collection(RESTAURANTS_KEY, &restaurants)
    }
}

impl CategoryReader for LocalRepository {
    fn get_category_by_id(
        &self,
        category_id: i32,
        restaurant_id: i32,
    ) -> RepositoryResult<Option<MenuCategory>> {
        let _guard = self.guard();
        let categories: Vec<MenuCategory> = self.read_collection(CATEGORIES_KEY);
        Ok(categories
            .into_iter()
            .find(|record| record.id == category_id && record.restaurant_id == restaurant_id))
    }

    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<MenuCategory>)> {
        let _guard = self.guard();
        let categories: Vec<MenuCategory> = self.read_collection(CATEGORIES_KEY);

        let mut matching: Vec<MenuCategory> = categories
            .into_iter()
            .filter(|record| record.restaurant_id == query.restaurant_id)
            .filter(|record| query.include_inactive || record.is_active)
            .collect();

        matching.sort_by_key(|record| (record.display_order, record.id));
        let total = matching.len();

        Ok((total, paginate(matching, &query.pagination)))
    }
}

impl CategoryWriter for LocalRepository {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<MenuCategory> {
        let _guard = self.guard();
        let mut categories: Vec<MenuCategory> = self.read_collection(CATEGORIES_KEY);

        let now = Local::now().naive_utc();
        let created = MenuCategory {
            id: next_id(categories.iter().map(|record| record.id)),
            restaurant_id: new_category.restaurant_id,
            name: new_category.name.clone(),
            description: new_category.description.clone(),
            display_order: new_category.display_order,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        categories.push(created.clone());
        self.write_collection(CATEGORIES_KEY, &categories)?;

        Ok(created)
    }

    fn update_category(
        &self,
        category_id: i32,
        restaurant_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<MenuCategory> {
        let _guard = self.guard();
        let mut categories: Vec<MenuCategory> = self.read_collection(CATEGORIES_KEY);

        let record = categories
            .iter_mut()
            .find(|record| record.id == category_id && record.restaurant_id == restaurant_id)
            .ok_or(RepositoryError::NotFound)?;

        record.name = updates.name.clone();
        record.description = updates.description.clone();
        record.display_order = updates.display_order;
        record.is_active = updates.is_active;
        record.updated_at = Local::now().naive_utc();
        let updated = record.clone();

        self.write_collection(CATEGORIES_KEY, &categories)?;

        Ok(updated)
    }

    fn delete_category(&self, category_id: i32, restaurant_id: i32) -> RepositoryResult<()> {
        let _guard = self.guard();
        let mut categories: Vec<MenuCategory> = self.read_collection(CATEGORIES_KEY);

        let before = categories.len();
        categories
            .retain(|record| !(record.id == category_id && record.restaurant_id == restaurant_id));

        if categories.len() == before {
            return Err(RepositoryError::NotFound);
        }

        self.write_collection(CATEGORIES_KEY, &categories)
    }
}

impl MenuItemReader for LocalRepository {
    fn get_menu_item_by_id(
        &self,
        item_id: i32,
        restaurant_id: i32,
    ) -> RepositoryResult<Option<MenuItem>> {
        let _guard = self.guard();
        let items: Vec<MenuItem> = self.read_collection(ITEMS_KEY);
        Ok(items
            .into_iter()
            .find(|record| record.id == item_id && record.restaurant_id == restaurant_id))
    }

    fn list_menu_items(
        &self,
        query: MenuItemListQuery,
    ) -> RepositoryResult<(usize, Vec<MenuItem>)> {
        let _guard = self.guard();
        let items: Vec<MenuItem> = self.read_collection(ITEMS_KEY);

        let mut matching: Vec<MenuItem> = items
            .into_iter()
            .filter(|record| record.restaurant_id == query.restaurant_id)
            .filter(|record| {
                query
                    .category_id
                    .is_none_or(|category_id| record.category_id == category_id)
            })
            .filter(|record| query.include_unavailable || record.is_available)
            .filter(|record| {
                query.search.as_ref().is_none_or(|term| {
                    matches_search(term, &record.name, record.description.as_deref())
                })
            })
            .collect();

        matching.sort_by_key(|record| (record.display_order, record.id));
        let total = matching.len();

        Ok((total, paginate(matching, &query.pagination)))
    }
}

impl MenuItemWriter for LocalRepository {
    fn create_menu_item(&self, new_item: &NewMenuItem) -> RepositoryResult<MenuItem> {
        let _guard = self.guard();
        let mut items: Vec<MenuItem> = self.read_collection(ITEMS_KEY);

        let now = Local::now().naive_utc();
        let created = MenuItem {
            id: next_id(items.iter().map(|record| record.id)),
            restaurant_id: new_item.restaurant_id,
            category_id: new_item.category_id,
            name: new_item.name.clone(),
            description: new_item.description.clone(),
            price_cents: new_item.price_cents,
            is_veg: new_item.is_veg,
            is_spicy: new_item.is_spicy,
            is_featured: new_item.is_featured,
            is_available: true,
            display_order: new_item.display_order,
            created_at: now,
            updated_at: now,
        };

        items.push(created.clone());
        self.write_collection(ITEMS_KEY, &items)?;

        Ok(created)
    }

    fn update_menu_item(
        &self,
        item_id: i32,
        restaurant_id: i32,
        updates: &UpdateMenuItem,
    ) -> RepositoryResult<MenuItem> {
        let _guard = self.guard();
        let mut items: Vec<MenuItem> = self.read_collection(ITEMS_KEY);

        let record = items
            .iter_mut()
            .find(|record| record.id == item_id && record.restaurant_id == restaurant_id)
            .ok_or(RepositoryError::NotFound)?;

        record.category_id = updates.category_id;
        record.name = updates.name.clone();
        record.description = updates.description.clone();
        record.price_cents = updates.price_cents;
        record.is_veg = updates.is_veg;
        record.is_spicy = updates.is_spicy;
        record.is_featured = updates.is_featured;
        record.is_available = updates.is_available;
        record.display_order = updates.display_order;
        record.updated_at = Local::now().naive_utc();
        let updated = record.clone();

        self.write_collection(ITEMS_KEY, &items)?;

        Ok(updated)
    }

    fn delete_menu_item(&self, item_id: i32, restaurant_id: i32) -> RepositoryResult<()> {
        let _guard = self.guard();
        let mut items: Vec<MenuItem> = self.read_collection(ITEMS_KEY);

        let before = items.len();
        items.retain(|record| !(record.id == item_id && record.restaurant_id == restaurant_id));

        if items.len() == before {
            return Err(RepositoryError::NotFound);
        }

        self.write_collection(ITEMS_KEY, &items)
    }

    fn delete_menu_items_by_category(
        &self,
        category_id: i32,
        restaurant_id: i32,
    ) -> RepositoryResult<usize> {
        let _guard = self.guard();
        let mut items: Vec<MenuItem> = self.read_collection(ITEMS_KEY);

        let before = items.len();
        items.retain(|record| {
            !(record.category_id == category_id && record.restaurant_id == restaurant_id)
        });
        let deleted = before - items.len();

        if deleted > 0 {
            self.write_collection(ITEMS_KEY, &items)?;
        }

        Ok(deleted)
    }
}
