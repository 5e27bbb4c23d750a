use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::CategoryListQuery;
use crate::domain::item::{MenuItem, MenuItemListQuery};
use crate::forms::items::{AddMenuItemForm, EditMenuItemForm, UploadMenuItemsForm};
use crate::repository::{CategoryReader, MenuItemReader, MenuItemWriter, RestaurantReader};
use crate::services::{ServiceError, ServiceResult, ensure_owner};

/// Creates a new menu item on a restaurant the user owns.
///
/// The target category must belong to the same restaurant.
pub fn create_menu_item<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddMenuItemForm,
) -> ServiceResult<MenuItem>
where
    R: RestaurantReader + CategoryReader + MenuItemWriter + ?Sized,
{
    let new_item = form
        .into_new_menu_item()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_owner(repo, new_item.restaurant_id, &user.sub)?;
    ensure_category_in_restaurant(repo, new_item.category_id, new_item.restaurant_id)?;

    repo.create_menu_item(&new_item).map_err(ServiceError::from)
}

/// Updates a menu item on a restaurant the user owns.
pub fn modify_menu_item<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditMenuItemForm,
) -> ServiceResult<MenuItem>
where
    R: RestaurantReader + CategoryReader + MenuItemWriter + ?Sized,
{
    let payload = form
        .into_update_menu_item()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_owner(repo, payload.restaurant_id, &user.sub)?;
    ensure_category_in_restaurant(repo, payload.update.category_id, payload.restaurant_id)?;

    repo.update_menu_item(payload.item_id, payload.restaurant_id, &payload.update)
        .map_err(ServiceError::from)
}

/// Deletes a menu item on a restaurant the user owns.
pub fn remove_menu_item<R>(
    repo: &R,
    user: &AuthenticatedUser,
    restaurant_id: i32,
    item_id: i32,
) -> ServiceResult<()>
where
    R: RestaurantReader + MenuItemWriter + ?Sized,
{
    ensure_owner(repo, restaurant_id, &user.sub)?;

    repo.delete_menu_item(item_id, restaurant_id)
        .map_err(ServiceError::from)
}

/// Imports menu items from an uploaded CSV file. Returns the number of
/// items created.
pub fn import_menu_items<R>(
    repo: &R,
    user: &AuthenticatedUser,
    restaurant_id: i32,
    form: UploadMenuItemsForm,
) -> ServiceResult<usize>
where
    R: RestaurantReader + CategoryReader + MenuItemWriter + ?Sized,
{
    ensure_owner(repo, restaurant_id, &user.sub)?;

    let (_, categories) = repo
        .list_categories(CategoryListQuery::new(restaurant_id).include_inactive())
        .map_err(ServiceError::from)?;

    let new_items = form
        .into_new_menu_items(restaurant_id, &categories)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let mut created = 0usize;
    for new_item in &new_items {
        repo.create_menu_item(new_item).map_err(ServiceError::from)?;
        created += 1;
    }

    Ok(created)
}

/// Lists the available items of a restaurant in render order, optionally
/// restricted to one category; backs `GET /api/menu-items`.
pub fn list_available_items<R>(
    repo: &R,
    restaurant_id: i32,
    category_id: Option<i32>,
) -> ServiceResult<Vec<MenuItem>>
where
    R: MenuItemReader + ?Sized,
{
    let mut query = MenuItemListQuery::new(restaurant_id);
    if let Some(category_id) = category_id {
        query = query.category(category_id);
    }

    let (_, items) = repo.list_menu_items(query).map_err(ServiceError::from)?;

    Ok(items)
}

fn ensure_category_in_restaurant<R>(
    repo: &R,
    category_id: i32,
    restaurant_id: i32,
) -> ServiceResult<()>
where
    R: CategoryReader + ?Sized,
{
    repo.get_category_by_id(category_id, restaurant_id)
        .map_err(ServiceError::from)?
        .map(|_| ())
        .ok_or_else(|| {
            ServiceError::Form("selected category does not belong to this restaurant".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::category::{MenuCategory, NewCategory, UpdateCategory};
    use crate::domain::item::{NewMenuItem, UpdateMenuItem};
    use crate::domain::restaurant::Restaurant;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{
        MockCategoryReader, MockMenuItemWriter, MockRestaurantReader,
    };

    struct MockItemRepo {
        restaurants: MockRestaurantReader,
        categories: MockCategoryReader,
        items: MockMenuItemWriter,
    }

    impl MockItemRepo {
        fn new() -> Self {
            Self {
                restaurants: MockRestaurantReader::new(),
                categories: MockCategoryReader::new(),
                items: MockMenuItemWriter::new(),
            }
        }
    }

    impl RestaurantReader for MockItemRepo {
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

    impl CategoryReader for MockItemRepo {
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

    impl crate::repository::CategoryWriter for MockItemRepo {
        fn create_category(&self, _new_category: &NewCategory) -> RepositoryResult<MenuCategory> {
            unimplemented!("not used in these tests")
        }

        fn update_category(
            &self,
            _category_id: i32,
            _restaurant_id: i32,
            _updates: &UpdateCategory,
        ) -> RepositoryResult<MenuCategory> {
            unimplemented!("not used in these tests")
        }

        fn delete_category(&self, _category_id: i32, _restaurant_id: i32) -> RepositoryResult<()> {
            unimplemented!("not used in these tests")
        }
    }

    impl MenuItemWriter for MockItemRepo {
        fn create_menu_item(&self, new_item: &NewMenuItem) -> RepositoryResult<MenuItem> {
            self.items.create_menu_item(new_item)
        }

        fn update_menu_item(
            &self,
            item_id: i32,
            restaurant_id: i32,
            updates: &UpdateMenuItem,
        ) -> RepositoryResult<MenuItem> {
            self.items.update_menu_item(item_id, restaurant_id, updates)
        }

        fn delete_menu_item(&self, item_id: i32, restaurant_id: i32) -> RepositoryResult<()> {
            self.items.delete_menu_item(item_id, restaurant_id)
        }

        fn delete_menu_items_by_category(
            &self,
            category_id: i32,
            restaurant_id: i32,
        ) -> RepositoryResult<usize> {
            self.items
                .delete_menu_items_by_category(category_id, restaurant_id)
        }
    }

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn sample_restaurant(id: i32, owner_id: &str) -> Restaurant {
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
            owner_id: owner_id.to_string(),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_category(id: i32, restaurant_id: i32, name: &str) -> MenuCategory {
        MenuCategory {
            id,
            restaurant_id,
            name: name.to_string(),
            description: None,
            display_order: 0,
            is_active: true,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_item(id: i32, restaurant_id: i32, category_id: i32, name: &str) -> MenuItem {
        MenuItem {
            id,
            restaurant_id,
            category_id,
            name: name.to_string(),
            description: None,
            price_cents: 35000,
            is_veg: false,
            is_spicy: true,
            is_featured: false,
            is_available: true,
            display_order: 0,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new("owner-1", "owner@example.com", "Owner")
    }

    fn add_form(restaurant_id: i32, category_id: i32) -> AddMenuItemForm {
        AddMenuItemForm {
            restaurant_id,
            category_id,
            name: "Fish Curry".to_string(),
            description: Some("House specialty".to_string()),
            price: 350.0,
            is_veg: false,
            is_spicy: true,
            is_featured: false,
            display_order: None,
        }
    }

    #[test]
    fn create_menu_item_converts_price_to_cents() {
        let mut repo = MockItemRepo::new();
        repo.restaurants
            .expect_get_restaurant_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_restaurant(id, "owner-1"))));
        repo.categories
            .expect_get_category_by_id()
            .times(1)
            .returning(|category_id, restaurant_id| {
                Ok(Some(sample_category(category_id, restaurant_id, "Main Course")))
            });
        repo.items
            .expect_create_menu_item()
            .times(1)
            .withf(|new_item| {
                assert_eq!(new_item.name, "Fish Curry");
                assert_eq!(new_item.price_cents, 35000);
                assert!(new_item.is_spicy);
                assert!(!new_item.is_veg);
                true
            })
            .returning(|new_item| {
                Ok(sample_item(7, new_item.restaurant_id, new_item.category_id, &new_item.name))
            });

        let created =
            create_menu_item(&repo, &user(), add_form(3, 10)).expect("expected success");

        assert_eq!(created.id, 7);
    }

    #[test]
    fn create_menu_item_rejects_foreign_category() {
        let mut repo = MockItemRepo::new();
        repo.restaurants
            .expect_get_restaurant_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_restaurant(id, "owner-1"))));
        repo.categories
            .expect_get_category_by_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let result = create_menu_item(&repo, &user(), add_form(3, 99));

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn create_menu_item_requires_ownership() {
        let mut repo = MockItemRepo::new();
        repo.restaurants
            .expect_get_restaurant_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_restaurant(id, "someone-else"))));

        let result = create_menu_item(&repo, &user(), add_form(3, 10));

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn import_menu_items_resolves_categories_by_name() {
        let mut repo = MockItemRepo::new();
        repo.restaurants
            .expect_get_restaurant_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_restaurant(id, "owner-1"))));
        repo.categories
            .expect_list_categories()
            .times(1)
            .returning(|query| {
                assert!(query.include_inactive);
                Ok((1, vec![sample_category(10, query.restaurant_id, "Main Course")]))
            });
        repo.items
            .expect_create_menu_item()
            .times(2)
            .withf(|new_item| {
                assert_eq!(new_item.category_id, 10);
                true
            })
            .returning(|new_item| {
                Ok(sample_item(1, new_item.restaurant_id, new_item.category_id, &new_item.name))
            });

        let csv =
            b"name,category,price\nFish Curry,Main Course,350\nPaneer Butter Masala,main course,280\n"
                .to_vec();
        let form = UploadMenuItemsForm::new(Some("menu.csv".to_string()), csv);

        let created = import_menu_items(&repo, &user(), 3, form).expect("expected success");

        assert_eq!(created, 2);
    }

    #[test]
    fn import_menu_items_rejects_unknown_category() {
        let mut repo = MockItemRepo::new();
        repo.restaurants
            .expect_get_restaurant_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_restaurant(id, "owner-1"))));
        repo.categories
            .expect_list_categories()
            .times(1)
            .returning(|query| {
                Ok((1, vec![sample_category(10, query.restaurant_id, "Main Course")]))
            });

        let csv = b"name,category,price\nFish Curry,Unknown,350\n".to_vec();
        let form = UploadMenuItemsForm::new(None, csv);

        let result = import_menu_items(&repo, &user(), 3, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
