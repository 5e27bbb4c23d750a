use crate::db::{DbConnection, DbPool};
use crate::domain::category::{CategoryListQuery, MenuCategory, NewCategory, UpdateCategory};
use crate::domain::item::{MenuItem, MenuItemListQuery, NewMenuItem, UpdateMenuItem};
use crate::domain::restaurant::{
    NewRestaurant, Restaurant, RestaurantListQuery, UpdateRestaurant,
};

pub mod category;
pub mod errors;
pub mod fallback;
pub mod item;
pub mod local;
pub mod restaurant;

#[cfg(test)]
pub mod mock;

pub use errors::{RepositoryError, RepositoryResult};
pub use fallback::FallbackRepository;
pub use local::LocalRepository;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over restaurant records.
pub trait RestaurantReader {
    fn get_restaurant_by_id(&self, id: i32) -> RepositoryResult<Option<Restaurant>>;
    /// Slug lookup used by the public menu; only active restaurants match.
    fn get_restaurant_by_slug(&self, slug: &str) -> RepositoryResult<Option<Restaurant>>;
    fn list_restaurants(
        &self,
        query: RestaurantListQuery,
    ) -> RepositoryResult<(usize, Vec<Restaurant>)>;
}

/// Write operations over restaurant records, scoped to the owning user.
pub trait RestaurantWriter {
    fn create_restaurant(&self, new_restaurant: &NewRestaurant) -> RepositoryResult<Restaurant>;
    fn update_restaurant(
        &self,
        restaurant_id: i32,
        owner_id: &str,
        updates: &UpdateRestaurant,
    ) -> RepositoryResult<Restaurant>;
    fn delete_restaurant(&self, restaurant_id: i32, owner_id: &str) -> RepositoryResult<()>;
}

/// Read-only operations over menu category records.
pub trait CategoryReader {
    fn get_category_by_id(
        &self,
        category_id: i32,
        restaurant_id: i32,
    ) -> RepositoryResult<Option<MenuCategory>>;
    /// Lists categories in render order: `display_order` ascending, ties
    /// broken by insertion id.
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<MenuCategory>)>;
}

/// Write operations over menu category records, scoped to a restaurant.
///
/// Deleting a category does NOT cascade to its items; callers remove the
/// items explicitly first.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<MenuCategory>;
    fn update_category(
        &self,
        category_id: i32,
        restaurant_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<MenuCategory>;
    fn delete_category(&self, category_id: i32, restaurant_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over menu item records.
pub trait MenuItemReader {
    fn get_menu_item_by_id(
        &self,
        item_id: i32,
        restaurant_id: i32,
    ) -> RepositoryResult<Option<MenuItem>>;
    /// Lists items in render order: `display_order` ascending, ties broken
    /// by insertion id.
    fn list_menu_items(
        &self,
        query: MenuItemListQuery,
    ) -> RepositoryResult<(usize, Vec<MenuItem>)>;
}

/// Write operations over menu item records, scoped to a restaurant.
pub trait MenuItemWriter {
    fn create_menu_item(&self, new_item: &NewMenuItem) -> RepositoryResult<MenuItem>;
    fn update_menu_item(
        &self,
        item_id: i32,
        restaurant_id: i32,
        updates: &UpdateMenuItem,
    ) -> RepositoryResult<MenuItem>;
    fn delete_menu_item(&self, item_id: i32, restaurant_id: i32) -> RepositoryResult<()>;
    /// Explicit cascade helper used when a category is removed. Returns the
    /// number of items deleted.
    fn delete_menu_items_by_category(
        &self,
        category_id: i32,
        restaurant_id: i32,
    ) -> RepositoryResult<usize>;
}
