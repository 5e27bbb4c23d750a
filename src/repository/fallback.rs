use crate::domain::category::{CategoryListQuery, MenuCategory, NewCategory, UpdateCategory};
use crate::domain::item::{MenuItem, MenuItemListQuery, NewMenuItem, UpdateMenuItem};
use crate::domain::restaurant::{
    NewRestaurant, Restaurant, RestaurantListQuery, UpdateRestaurant,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CategoryReader, CategoryWriter, DieselRepository, LocalRepository, MenuItemReader,
    MenuItemWriter, RestaurantReader, RestaurantWriter,
};

#[derive(Clone)]
/// Per-call routing between the database backend and the local store.
///
/// Without a configured backend every call goes straight to the local
/// store (demo mode). With a backend, each call first tries the database
/// and falls back to the local store on any repository error; the failure
/// is logged and never surfaced to the caller. The decision is re-evaluated
/// on every call, never cached.
pub struct FallbackRepository {
    backend: Option<DieselRepository>,
    local: LocalRepository,
}

impl FallbackRepository {
    pub fn new(backend: Option<DieselRepository>, local: LocalRepository) -> Self {
        Self { backend, local }
    }

    /// Whether the service is running without a database backend.
    pub fn is_demo(&self) -> bool {
        self.backend.is_none()
    }

    /// The local store behind this selector.
    pub fn local(&self) -> &LocalRepository {
        &self.local
    }

    fn route<T>(
        &self,
        operation: &str,
        backend_call: impl FnOnce(&DieselRepository) -> RepositoryResult<T>,
        local_call: impl FnOnce(&LocalRepository) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        match &self.backend {
            None => local_call(&self.local),
            Some(backend) => match backend_call(backend) {
                Ok(value) => Ok(value),
                // Expected outcomes pass through; only backend failures
                // reroute to the local store.
                Err(err @ (RepositoryError::NotFound | RepositoryError::Conflict)) => Err(err),
                Err(err) => {
                    log::warn!("backend {operation} failed, using local store: {err}");
                    local_call(&self.local)
                }
            },
        }
    }
}

impl RestaurantReader for FallbackRepository {
    fn get_restaurant_by_id(&self, id: i32) -> RepositoryResult<Option<Restaurant>> {
        self.route(
            "get_restaurant_by_id",
            |backend| backend.get_restaurant_by_id(id),
            |local| local.get_restaurant_by_id(id),
        )
    }

    fn get_restaurant_by_slug(&self, slug: &str) -> RepositoryResult<Option<Restaurant>> {
        self.route(
            "get_restaurant_by_slug",
            |backend| backend.get_restaurant_by_slug(slug),
            |local| local.get_restaurant_by_slug(slug),
        )
    }

    fn list_restaurants(
        &self,
        query: RestaurantListQuery,
    ) -> RepositoryResult<(usize, Vec<Restaurant>)> {
        let local_query = query.clone();
        self.route(
            "list_restaurants",
            |backend| backend.list_restaurants(query),
            |local| local.list_restaurants(local_query),
        )
    }
}

impl RestaurantWriter for FallbackRepository {
    fn create_restaurant(&self, new_restaurant: &NewRestaurant) -> RepositoryResult<Restaurant> {
        self.route(
            "create_restaurant",
            |backend| backend.create_restaurant(new_restaurant),
            |local| local.create_restaurant(new_restaurant),
        )
    }

    fn update_restaurant(
        &self,
        restaurant_id: i32,
        owner_id: &str,
        updates: &UpdateRestaurant,
    ) -> RepositoryResult<Restaurant> {
        self.route(
            "update_restaurant",
            |backend| backend.update_restaurant(restaurant_id, owner_id, updates),
            |local| local.update_restaurant(restaurant_id, owner_id, updates),
        )
    }

    fn delete_restaurant(&self, restaurant_id: i32, owner_id: &str) -> RepositoryResult<()> {
        self.route(
            "delete_restaurant",
            |backend| backend.delete_restaurant(restaurant_id, owner_id),
            |local| local.delete_restaurant(restaurant_id, owner_id),
        )
    }
}

impl CategoryReader for FallbackRepository {
    fn get_category_by_id(
        &self,
        category_id: i32,
        restaurant_id: i32,
    ) -> RepositoryResult<Option<MenuCategory>> {
        self.route(
            "get_category_by_id",
            |backend| backend.get_category_by_id(category_id, restaurant_id),
            |local| local.get_category_by_id(category_id, restaurant_id),
        )
    }

    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<MenuCategory>)> {
        let local_query = query.clone();
        self.route(
            "list_categories",
            |backend| backend.list_categories(query),
            |local| local.list_categories(local_query),
        )
    }
}

impl CategoryWriter for FallbackRepository {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<MenuCategory> {
        self.route(
            "create_category",
            |backend| backend.create_category(new_category),
            |local| local.create_category(new_category),
        )
    }

    fn update_category(
        &self,
        category_id: i32,
        restaurant_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<MenuCategory> {
        self.route(
            "update_category",
            |backend| backend.update_category(category_id, restaurant_id, updates),
            |local| local.update_category(category_id, restaurant_id, updates),
        )
    }

    fn delete_category(&self, category_id: i32, restaurant_id: i32) -> RepositoryResult<()> {
        self.route(
            "delete_category",
            |backend| backend.delete_category(category_id, restaurant_id),
            |local| local.delete_category(category_id, restaurant_id),
        )
    }
}

impl MenuItemReader for FallbackRepository {
    fn get_menu_item_by_id(
        &self,
        item_id: i32,
        restaurant_id: i32,
    ) -> RepositoryResult<Option<MenuItem>> {
        self.route(
            "get_menu_item_by_id",
            |backend| backend.get_menu_item_by_id(item_id, restaurant_id),
            |local| local.get_menu_item_by_id(item_id, restaurant_id),
        )
    }

    fn list_menu_items(
        &self,
        query: MenuItemListQuery,
    ) -> RepositoryResult<(usize, Vec<MenuItem>)> {
        let local_query = query.clone();
        self.route(
            "list_menu_items",
            |backend| backend.list_menu_items(query),
            |local| local.list_menu_items(local_query),
        )
    }
}

impl MenuItemWriter for FallbackRepository {
    fn create_menu_item(&self, new_item: &NewMenuItem) -> RepositoryResult<MenuItem> {
        self.route(
            "create_menu_item",
            |backend| backend.create_menu_item(new_item),
            |local| local.create_menu_item(new_item),
        )
    }

    fn update_menu_item(
        &self,
        item_id: i32,
        restaurant_id: i32,
        updates: &UpdateMenuItem,
    ) -> RepositoryResult<MenuItem> {
        self.route(
            "update_menu_item",
            |backend| backend.update_menu_item(item_id, restaurant_id, updates),
            |local| local.update_menu_item(item_id, restaurant_id, updates),
        )
    }

    fn delete_menu_item(&self, item_id: i32, restaurant_id: i32) -> RepositoryResult<()> {
        self.route(
            "delete_menu_item",
            |backend| backend.delete_menu_item(item_id, restaurant_id),
            |local| local.delete_menu_item(item_id, restaurant_id),
        )
    }

    fn delete_menu_items_by_category(
        &self,
        category_id: i32,
        restaurant_id: i32,
    ) -> RepositoryResult<usize> {
        self.route(
            "delete_menu_items_by_category",
            |backend| backend.delete_menu_items_by_category(category_id, restaurant_id),
            |local| local.delete_menu_items_by_category(category_id, restaurant_id),
        )
    }
}
