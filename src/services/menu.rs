use std::collections::HashMap;

use crate::domain::category::{CategoryListQuery, MenuCategory};
use crate::domain::item::{MenuItem, MenuItemListQuery};
use crate::domain::menu::{CategoryWithItems, RestaurantWithMenu};
use crate::repository::{CategoryReader, MenuItemReader, RestaurantReader};
use crate::services::{ServiceError, ServiceResult};

/// Fetch the public menu for a restaurant slug.
///
/// Only active restaurants match; active categories come back in display
/// order with their available items grouped underneath. Categories without
/// items are kept, unless `search` is given: the search predicate filters
/// items by name/description and drops the categories it leaves empty.
///
/// No retries happen here: resilience against a failing backend comes
/// entirely from the repository passed in.
pub fn get_menu_for_slug<R>(
    repo: &R,
    slug: &str,
    search: Option<&str>,
) -> ServiceResult<RestaurantWithMenu>
where
    R: RestaurantReader + CategoryReader + MenuItemReader + ?Sized,
{
    let restaurant = repo
        .get_restaurant_by_slug(slug)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let (_, categories) = repo
        .list_categories(CategoryListQuery::new(restaurant.id))
        .map_err(ServiceError::from)?;

    let mut items_query = MenuItemListQuery::new(restaurant.id);
    if let Some(term) = search {
        items_query = items_query.search(term);
    }

    let (_, items) = repo
        .list_menu_items(items_query)
        .map_err(ServiceError::from)?;

    let categories = group_items_by_category(categories, items, search.is_some());

    Ok(RestaurantWithMenu {
        restaurant,
        categories,
    })
}

/// Attach each item to its declared category, preserving the incoming
/// category and item order. With `drop_empty`, categories left without
/// items are filtered out.
fn group_items_by_category(
    categories: Vec<MenuCategory>,
    items: Vec<MenuItem>,
    drop_empty: bool,
) -> Vec<CategoryWithItems> {
    let mut items_by_category: HashMap<i32, Vec<MenuItem>> = HashMap::new();
    for item in items {
        items_by_category
            .entry(item.category_id)
            .or_default()
            .push(item);
    }

    categories
        .into_iter()
        .filter_map(|category| {
            let items = items_by_category.remove(&category.id).unwrap_or_default();
            if drop_empty && items.is_empty() {
                None
            } else {
                Some(CategoryWithItems::new(category).with_items(items))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::restaurant::Restaurant;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockCategoryReader, MockMenuItemReader, MockRestaurantReader};
    use crate::repository::{CategoryReader, MenuItemReader, RestaurantReader};

    struct MockMenuRepo {
        restaurants: MockRestaurantReader,
        categories: MockCategoryReader,
        items: MockMenuItemReader,
    }

    impl MockMenuRepo {
        fn new() -> Self {
            Self {
                restaurants: MockRestaurantReader::new(),
                categories: MockCategoryReader::new(),
                items: MockMenuItemReader::new(),
            }
        }
    }

    impl RestaurantReader for MockMenuRepo {
        fn get_restaurant_by_id(&self, id: i32) -> RepositoryResult<Option<Restaurant>> {
            self.restaurants.get_restaurant_by_id(id)
        }

        fn get_restaurant_by_slug(&self, slug: &str) -> RepositoryResult<Option<Restaurant>> {
            self.restaurants.get_restaurant_by_slug(slug)
        }

        fn list_restaurants(
            &self,
            query: crate::domain::restaurant::RestaurantListQuery,
        ) -> RepositoryResult<(usize, Vec<Restaurant>)> {
            self.restaurants.list_restaurants(query)
        }
    }

    impl CategoryReader for MockMenuRepo {
        fn get_category_by_id(
            &self,
            category_id: i32,
            restaurant_id: i32,
        ) -> RepositoryResult<Option<MenuCategory>> {
            self.categories.get_category_by_id(category_id, restaurant_id)
        }

        fn list_categories(
            &self,
            query: CategoryListQuery,
        ) -> RepositoryResult<(usize, Vec<MenuCategory>)> {
            self.categories.list_categories(query)
        }
    }

    impl MenuItemReader for MockMenuRepo {
        fn get_menu_item_by_id(
            &self,
            item_id: i32,
            restaurant_id: i32,
        ) -> RepositoryResult<Option<MenuItem>> {
            self.items.get_menu_item_by_id(item_id, restaurant_id)
        }

        fn list_menu_items(
            &self,
            query: MenuItemListQuery,
        ) -> RepositoryResult<(usize, Vec<MenuItem>)> {
            self.items.list_menu_items(query)
        }
    }

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn sample_restaurant(id: i32) -> Restaurant {
        Restaurant {
            id,
            name: "Spice Garden".to_string(),
            slug: "spice-garden".to_string(),
            description: None,
            phone: None,
            email: None,
            address: None,
            color_scheme: "orange".to_string(),
            is_active: true,
            owner_id: "owner-1".to_string(),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_category(id: i32, restaurant_id: i32, name: &str, display_order: i32) -> MenuCategory {
        MenuCategory {
            id,
            restaurant_id,
            name: name.to_string(),
            description: None,
            display_order,
            is_active: true,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_item(
        id: i32,
        restaurant_id: i32,
        category_id: i32,
        name: &str,
        price_cents: i64,
    ) -> MenuItem {
        MenuItem {
            id,
            restaurant_id,
            category_id,
            name: name.to_string(),
            description: None,
            price_cents,
            is_veg: false,
            is_spicy: false,
            is_featured: false,
            is_available: true,
            display_order: 0,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn unknown_slug_returns_not_found() {
        let mut repo = MockMenuRepo::new();
        repo.restaurants
            .expect_get_restaurant_by_slug()
            .times(1)
            .returning(|_| Ok(None));

        let result = get_menu_for_slug(&repo, "missing", None);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn groups_items_under_declared_categories_in_order() {
        let mut repo = MockMenuRepo::new();
        repo.restaurants
            .expect_get_restaurant_by_slug()
            .times(1)
            .returning(|_| Ok(Some(sample_restaurant(1))));
        repo.categories
            .expect_list_categories()
            .times(1)
            .returning(|query| {
                assert_eq!(query.restaurant_id, 1);
                assert!(!query.include_inactive);
                Ok((2, vec![
                    sample_category(10, 1, "Main Course", 0),
                    sample_category(11, 1, "Desserts", 1),
                ]))
            });
        repo.items
            .expect_list_menu_items()
            .times(1)
            .returning(|query| {
                assert_eq!(query.restaurant_id, 1);
                assert!(!query.include_unavailable);
                Ok((3, vec![
                    sample_item(100, 1, 10, "Fish Curry", 350),
                    sample_item(101, 1, 10, "Paneer Butter Masala", 280),
                    sample_item(102, 1, 11, "Gulab Jamun", 90),
                ]))
            });

        let menu = get_menu_for_slug(&repo, "spice-garden", None).expect("expected success");

        assert_eq!(menu.restaurant.slug, "spice-garden");
        assert_eq!(menu.categories.len(), 2);
        assert_eq!(menu.categories[0].category.name, "Main Course");
        assert_eq!(menu.categories[0].items.len(), 2);
        assert_eq!(menu.categories[0].items[0].name, "Fish Curry");
        assert_eq!(menu.categories[0].items[0].price_cents, 350);
        assert_eq!(menu.categories[1].category.name, "Desserts");
        assert_eq!(menu.categories[1].items.len(), 1);
    }

    #[test]
    fn empty_categories_are_kept_without_search() {
        let mut repo = MockMenuRepo::new();
        repo.restaurants
            .expect_get_restaurant_by_slug()
            .times(1)
            .returning(|_| Ok(Some(sample_restaurant(1))));
        repo.categories
            .expect_list_categories()
            .times(1)
            .returning(|_| {
                Ok((2, vec![
                    sample_category(10, 1, "Main Course", 0),
                    sample_category(11, 1, "Specials", 1),
                ]))
            });
        repo.items
            .expect_list_menu_items()
            .times(1)
            .returning(|_| Ok((1, vec![sample_item(100, 1, 10, "Fish Curry", 350)])));

        let menu = get_menu_for_slug(&repo, "spice-garden", None).expect("expected success");

        assert_eq!(menu.categories.len(), 2);
        assert!(menu.categories[1].items.is_empty());
    }

    #[test]
    fn search_drops_categories_left_empty() {
        let mut repo = MockMenuRepo::new();
        repo.restaurants
            .expect_get_restaurant_by_slug()
            .times(1)
            .returning(|_| Ok(Some(sample_restaurant(1))));
        repo.categories
            .expect_list_categories()
            .times(1)
            .returning(|_| {
                Ok((2, vec![
                    sample_category(10, 1, "Main Course", 0),
                    sample_category(11, 1, "Desserts", 1),
                ]))
            });
        repo.items
            .expect_list_menu_items()
            .times(1)
            .returning(|query| {
                assert_eq!(query.search.as_deref(), Some("curry"));
                Ok((1, vec![sample_item(100, 1, 10, "Fish Curry", 350)]))
            });

        let menu =
            get_menu_for_slug(&repo, "spice-garden", Some("curry")).expect("expected success");

        assert_eq!(menu.categories.len(), 1);
        assert_eq!(menu.categories[0].category.name, "Main Course");
    }
}
