use thiserror::Error;

use crate::domain::restaurant::Restaurant;
use crate::repository::RestaurantReader;
use crate::repository::errors::RepositoryError;

pub mod cart;
pub mod categories;
pub mod items;
pub mod main;
pub mod menu;
pub mod restaurants;

/// Result type returned by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer to the route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("authentication required")]
    Unauthorized,
    #[error("caller does not own the target restaurant")]
    Forbidden,
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Conflict,
    #[error("{0}")]
    Form(String),
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict => ServiceError::Conflict,
            other => ServiceError::Repository(other),
        }
    }
}

/// Load a restaurant and verify the acting user owns it.
///
/// Missing restaurants surface as `NotFound`, ownership violations as
/// `Forbidden`; authorization failures are always user-visible, they never
/// degrade silently.
pub fn ensure_owner<R>(
    repo: &R,
    restaurant_id: i32,
    owner_id: &str,
) -> ServiceResult<Restaurant>
where
    R: RestaurantReader + ?Sized,
{
    let restaurant = repo
        .get_restaurant_by_id(restaurant_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if restaurant.owner_id != owner_id {
        return Err(ServiceError::Forbidden);
    }

    Ok(restaurant)
}
