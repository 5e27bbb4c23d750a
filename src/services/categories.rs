use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::{CategoryListQuery, MenuCategory};
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter, MenuItemWriter, RestaurantReader};
use crate::services::{ServiceError, ServiceResult, ensure_owner};

/// Creates a new category on a restaurant the user owns.
pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCategoryForm,
) -> ServiceResult<MenuCategory>
where
    R: RestaurantReader + CategoryWriter + ?Sized,
{
    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_owner(repo, new_category.restaurant_id, &user.sub)?;

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

/// Updates a category on a restaurant the user owns.
pub fn modify_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditCategoryForm,
) -> ServiceResult<MenuCategory>
where
    R: RestaurantReader + CategoryWriter + ?Sized,
{
    let payload = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_owner(repo, payload.restaurant_id, &user.sub)?;

    repo.update_category(payload.category_id, payload.restaurant_id, &payload.update)
        .map_err(ServiceError::from)
}

/// Deletes a category on a restaurant the user owns.
///
/// The storage port does not cascade, so the category's items are removed
/// explicitly first.
pub fn remove_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    restaurant_id: i32,
    category_id: i32,
) -> ServiceResult<()>
where
    R: RestaurantReader + CategoryWriter + MenuItemWriter + ?Sized,
{
    ensure_owner(repo, restaurant_id, &user.sub)?;

    repo.delete_menu_items_by_category(category_id, restaurant_id)
        .map_err(ServiceError::from)?;

    repo.delete_category(category_id, restaurant_id)
        .map_err(ServiceError::from)
}

/// Lists the active categories of a restaurant in render order; backs
/// `GET /api/menu-categories`.
pub fn list_active_categories<R>(
    repo: &R,
    restaurant_id: i32,
) -> ServiceResult<Vec<MenuCategory>>
where
    R: CategoryReader + ?Sized,
{
    let (_, categories) = repo
        .list_categories(CategoryListQuery::new(restaurant_id))
        .map_err(ServiceError::from)?;

    Ok(categories)
}
