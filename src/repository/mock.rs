use mockall::mock;

use super::{
    CategoryReader, CategoryWriter, MenuItemReader, MenuItemWriter, RestaurantReader,
    RestaurantWriter,
};
use crate::domain::{
    category::{CategoryListQuery, MenuCategory, NewCategory, UpdateCategory},
    item::{MenuItem, MenuItemListQuery, NewMenuItem, UpdateMenuItem},
    restaurant::{NewRestaurant, Restaurant, RestaurantListQuery, UpdateRestaurant},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub RestaurantReader {}

    impl RestaurantReader for RestaurantReader {
        fn get_restaurant_by_id(&self, id: i32) -> RepositoryResult<Option<Restaurant>>;
        fn get_restaurant_by_slug(&self, slug: &str) -> RepositoryResult<Option<Restaurant>>;
        fn list_restaurants(&self, query: RestaurantListQuery) -> RepositoryResult<(usize, Vec<Restaurant>)>;
    }
}

mock! {
    pub RestaurantWriter {}

    impl RestaurantWriter for RestaurantWriter {
        fn create_restaurant(&self, new_restaurant: &NewRestaurant) -> RepositoryResult<Restaurant>;
        fn update_restaurant(&self, restaurant_id: i32, owner_id: &str, updates: &UpdateRestaurant) -> RepositoryResult<Restaurant>;
        fn delete_restaurant(&self, restaurant_id: i32, owner_id: &str) -> RepositoryResult<()>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn get_category_by_id(&self, category_id: i32, restaurant_id: i32) -> RepositoryResult<Option<MenuCategory>>;
        fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<(usize, Vec<MenuCategory>)>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<MenuCategory>;
        fn update_category(&self, category_id: i32, restaurant_id: i32, updates: &UpdateCategory) -> RepositoryResult<MenuCategory>;
        fn delete_category(&self, category_id: i32, restaurant_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub MenuItemReader {}

    impl MenuItemReader for MenuItemReader {
        fn get_menu_item_by_id(&self, item_id: i32, restaurant_id: i32) -> RepositoryResult<Option<MenuItem>>;
        fn list_menu_items(&self, query: MenuItemListQuery) -> RepositoryResult<(usize, Vec<MenuItem>)>;
    }
}

mock! {
    pub MenuItemWriter {}

    impl MenuItemWriter for MenuItemWriter {
        fn create_menu_item(&self, new_item: &NewMenuItem) -> RepositoryResult<MenuItem>;
        fn update_menu_item(&self, item_id: i32, restaurant_id: i32, updates: &UpdateMenuItem) -> RepositoryResult<MenuItem>;
        fn delete_menu_item(&self, item_id: i32, restaurant_id: i32) -> RepositoryResult<()>;
        fn delete_menu_items_by_category(&self, category_id: i32, restaurant_id: i32) -> RepositoryResult<usize>;
    }
}
