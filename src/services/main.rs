use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::restaurant::{Restaurant, RestaurantListQuery};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::RestaurantReader;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the dashboard index page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<usize>,
}

/// Data required to render the dashboard index template.
pub struct IndexPageData {
    /// Paginated list of the user's restaurants, deactivated ones included.
    pub restaurants: Paginated<Restaurant>,
    /// Search query echoed back to the template when present.
    pub search: Option<String>,
}

/// Loads the restaurant list for the dashboard index page.
pub fn load_index_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
) -> ServiceResult<IndexPageData>
where
    R: RestaurantReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query = RestaurantListQuery::new()
        .owner(&user.sub)
        .include_inactive()
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(value) = query.search.as_ref() {
        list_query = list_query.search(value);
    }

    let (total, restaurants) = repo
        .list_restaurants(list_query)
        .map_err(ServiceError::from)?;

    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    let restaurants = Paginated::new(restaurants, page, total_pages);

    Ok(IndexPageData {
        restaurants,
        search: query.search,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::repository::mock::MockRestaurantReader;

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn sample_restaurant(id: i32, owner_id: &str, name: &str) -> Restaurant {
        Restaurant {
            id,
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
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

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new("owner-1", "owner@example.com", "Owner")
    }

    #[test]
    fn load_index_page_scopes_to_owner_and_paginates() {
        let mut repo = MockRestaurantReader::new();
        let query = IndexQuery {
            search: Some("spice".to_string()),
            page: Some(2),
        };

        repo.expect_list_restaurants()
            .times(1)
            .withf(|query| {
                assert_eq!(query.owner_id.as_deref(), Some("owner-1"));
                assert!(query.include_inactive);
                assert_eq!(query.search.as_deref(), Some("spice"));
                match &query.pagination {
                    Some(pagination) => {
                        assert_eq!(pagination.page, 2);
                        assert_eq!(pagination.per_page, DEFAULT_ITEMS_PER_PAGE);
                    }
                    None => panic!("expected pagination to be set"),
                }
                true
            })
            .returning(|_| {
                Ok((
                    26,
                    vec![sample_restaurant(1, "owner-1", "Spice Garden")],
                ))
            });

        let data = load_index_page(&repo, &user(), query).expect("expected success");

        assert_eq!(data.search.as_deref(), Some("spice"));
        assert_eq!(data.restaurants.page, 2);
        assert_eq!(data.restaurants.total_pages, 2);
        assert_eq!(data.restaurants.items.len(), 1);
    }
}
