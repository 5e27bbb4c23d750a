use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::{CategoryListQuery, MenuCategory};
use crate::domain::item::{MenuItem, MenuItemListQuery};
use crate::domain::restaurant::{Restaurant, RestaurantListQuery};
use crate::forms::restaurants::{AddRestaurantForm, EditRestaurantForm};
use crate::repository::{
    CategoryReader, CategoryWriter, MenuItemReader, MenuItemWriter, RestaurantReader,
    RestaurantWriter,
};
use crate::services::{ServiceError, ServiceResult, ensure_owner};

/// Data required to render the restaurant management page.
pub struct RestaurantPageData {
    pub restaurant: Restaurant,
    /// All categories of the restaurant, inactive ones included.
    pub categories: Vec<MenuCategory>,
    /// All items of the restaurant, unavailable ones included.
    pub items: Vec<MenuItem>,
    /// Path of the public menu page, printed next to the QR hint.
    pub menu_path: String,
}

/// Loads the management page for one of the user's restaurants.
pub fn load_restaurant_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    restaurant_id: i32,
) -> ServiceResult<RestaurantPageData>
where
    R: RestaurantReader + CategoryReader + MenuItemReader + ?Sized,
{
    let restaurant = ensure_owner(repo, restaurant_id, &user.sub)?;

    let (_, categories) = repo
        .list_categories(CategoryListQuery::new(restaurant_id).include_inactive())
        .map_err(ServiceError::from)?;

    let (_, items) = repo
        .list_menu_items(MenuItemListQuery::new(restaurant_id).include_unavailable())
        .map_err(ServiceError::from)?;

    let menu_path = format!("/menu/{}", restaurant.slug);

    Ok(RestaurantPageData {
        restaurant,
        categories,
        items,
        menu_path,
    })
}

/// Creates a new restaurant owned by `owner_id`.
///
/// A slug collision surfaces as `Conflict` straight from the repository.
pub fn create_restaurant<R>(
    repo: &R,
    owner_id: &str,
    form: AddRestaurantForm,
) -> ServiceResult<Restaurant>
where
    R: RestaurantWriter + ?Sized,
{
    let new_restaurant = form
        .into_new_restaurant(owner_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_restaurant(&new_restaurant)
        .map_err(ServiceError::from)
}

/// Updates one of the user's restaurants from the settings form.
pub fn modify_restaurant<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditRestaurantForm,
) -> ServiceResult<Restaurant>
where
    R: RestaurantReader + RestaurantWriter + ?Sized,
{
    let payload = form
        .into_update_restaurant()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_owner(repo, payload.restaurant_id, &user.sub)?;

    repo.update_restaurant(payload.restaurant_id, &user.sub, &payload.update)
        .map_err(ServiceError::from)
}

/// Deletes one of the user's restaurants together with its menu.
///
/// The storage port does not cascade, so the categories and items are
/// removed explicitly before the restaurant itself.
pub fn remove_restaurant<R>(
    repo: &R,
    user: &AuthenticatedUser,
    restaurant_id: i32,
) -> ServiceResult<()>
where
    R: RestaurantReader
        + RestaurantWriter
        + CategoryReader
        + CategoryWriter
        + MenuItemWriter
        + ?Sized,
{
    ensure_owner(repo, restaurant_id, &user.sub)?;

    let (_, categories) = repo
        .list_categories(CategoryListQuery::new(restaurant_id).include_inactive())
        .map_err(ServiceError::from)?;

    for category in categories {
        repo.delete_menu_items_by_category(category.id, restaurant_id)
            .map_err(ServiceError::from)?;
        repo.delete_category(category.id, restaurant_id)
            .map_err(ServiceError::from)?;
    }

    repo.delete_restaurant(restaurant_id, &user.sub)
        .map_err(ServiceError::from)
}

/// Lists the restaurants owned by `owner_id`; backs `GET /api/restaurants`.
pub fn list_owned_restaurants<R>(repo: &R, owner_id: &str) -> ServiceResult<Vec<Restaurant>>
where
    R: RestaurantReader + ?Sized,
{
    let (_, restaurants) = repo
        .list_restaurants(
            RestaurantListQuery::new()
                .owner(owner_id)
                .include_inactive(),
        )
        .map_err(ServiceError::from)?;

    Ok(restaurants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::repository::mock::MockRestaurantWriter;

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn sample_restaurant(id: i32, owner_id: &str, slug: &str) -> Restaurant {
        Restaurant {
            id,
            name: "Spice Garden".to_string(),
            slug: slug.to_string(),
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

    #[test]
    fn create_restaurant_derives_slug_from_name() {
        let mut repo = MockRestaurantWriter::new();

        repo.expect_create_restaurant()
            .times(1)
            .withf(|new_restaurant| {
                assert_eq!(new_restaurant.name, "Spice Garden");
                assert_eq!(new_restaurant.slug, "spice-garden");
                assert_eq!(new_restaurant.owner_id, "owner-1");
                true
            })
            .returning(|new_restaurant| {
                Ok(sample_restaurant(1, &new_restaurant.owner_id, &new_restaurant.slug))
            });

        let form = AddRestaurantForm {
            name: "  Spice   Garden ".to_string(),
            slug: None,
            description: None,
            phone: None,
            email: None,
            address: None,
            color_scheme: None,
        };

        let created = create_restaurant(&repo, "owner-1", form).expect("expected success");

        assert_eq!(created.slug, "spice-garden");
    }

    #[test]
    fn create_restaurant_surfaces_slug_conflict() {
        let mut repo = MockRestaurantWriter::new();

        repo.expect_create_restaurant()
            .times(1)
            .returning(|_| -> RepositoryResult<Restaurant> { Err(RepositoryError::Conflict) });

        let form = AddRestaurantForm {
            name: "Spice Garden".to_string(),
            slug: Some("spice-garden".to_string()),
            description: None,
            phone: None,
            email: None,
            address: None,
            color_scheme: None,
        };

        let result = create_restaurant(&repo, "owner-1", form);

        assert!(matches!(result, Err(ServiceError::Conflict)));
    }

    #[test]
    fn create_restaurant_rejects_empty_name() {
        let repo = MockRestaurantWriter::new();

        let form = AddRestaurantForm {
            name: "   ".to_string(),
            slug: None,
            description: None,
            phone: None,
            email: None,
            address: None,
            color_scheme: None,
        };

        let result = create_restaurant(&repo, "owner-1", form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
