use diesel::prelude::*;

use crate::domain::restaurant::{
    NewRestaurant as DomainNewRestaurant, Restaurant as DomainRestaurant, RestaurantListQuery,
    UpdateRestaurant as DomainUpdateRestaurant,
};
use crate::models::restaurant::{
    NewRestaurant as DbNewRestaurant, Restaurant as DbRestaurant,
    UpdateRestaurant as DbUpdateRestaurant,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, RestaurantReader, RestaurantWriter};

impl RestaurantReader for DieselRepository {
    fn get_restaurant_by_id(&self, id: i32) -> RepositoryResult<Option<DomainRestaurant>> {
        use crate::schema::restaurants;

        let mut conn = self.conn()?;

        let restaurant = restaurants::table
            .filter(restaurants::id.eq(id))
            .first::<DbRestaurant>(&mut conn)
            .optional()?;

        Ok(restaurant.map(DomainRestaurant::from))
    }

    fn get_restaurant_by_slug(&self, slug: &str) -> RepositoryResult<Option<DomainRestaurant>> {
        use crate::schema::restaurants;

        let mut conn = self.conn()?;

        let restaurant = restaurants::table
            .filter(restaurants::slug.eq(slug))
            .filter(restaurants::is_active.eq(true))
            .first::<DbRestaurant>(&mut conn)
            .optional()?;

        Ok(restaurant.map(DomainRestaurant::from))
    }

    fn list_restaurants(
        &self,
        query: RestaurantListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainRestaurant>)> {
        use crate::schema::restaurants;

        let mut conn = self.conn()?;

        let mut count_query = restaurants::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(owner_id) = query.owner_id.as_ref() {
            count_query = count_query.filter(restaurants::owner_id.eq(owner_id));
        }

        if !query.include_inactive {
            count_query = count_query.filter(restaurants::is_active.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                restaurants::name
                    .like(pattern.clone())
                    .or(restaurants::description.like(pattern)),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items_query = restaurants::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(owner_id) = query.owner_id.as_ref() {
            items_query = items_query.filter(restaurants::owner_id.eq(owner_id));
        }

        if !query.include_inactive {
            items_query = items_query.filter(restaurants::is_active.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items_query = items_query.filter(
                restaurants::name
                    .like(pattern.clone())
                    .or(restaurants::description.like(pattern)),
            );
        }

        items_query = items_query.order(restaurants::id.asc());

        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1);
            let per_page = pagination.per_page as i64;
            let offset = ((page - 1) * pagination.per_page) as i64;
            items_query = items_query.offset(offset).limit(per_page);
        }

        let restaurants = items_query.load::<DbRestaurant>(&mut conn)?;
        let restaurants = restaurants
            .into_iter()
            .map(DomainRestaurant::from)
            .collect();

        Ok((total, restaurants))
    }
}

impl RestaurantWriter for DieselRepository {
    fn create_restaurant(
        &self,
        new_restaurant: &DomainNewRestaurant,
    ) -> RepositoryResult<DomainRestaurant> {
        use crate::schema::restaurants;

        let mut conn = self.conn()?;

        let insertable = DbNewRestaurant::from(new_restaurant);

        let created = diesel::insert_into(restaurants::table)
            .values(&insertable)
            .get_result::<DbRestaurant>(&mut conn)?;

        Ok(created.into())
    }

    fn update_restaurant(
        &self,
        restaurant_id: i32,
        owner_id: &str,
        updates: &DomainUpdateRestaurant,
    ) -> RepositoryResult<DomainRestaurant> {
        use crate::schema::restaurants;

        let mut conn = self.conn()?;

        let db_updates = DbUpdateRestaurant::from(updates);

        let target = restaurants::table
            .filter(restaurants::id.eq(restaurant_id))
            .filter(restaurants::owner_id.eq(owner_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbRestaurant>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_restaurant(&self, restaurant_id: i32, owner_id: &str) -> RepositoryResult<()> {
        use crate::schema::restaurants;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            restaurants::table
                .filter(restaurants::id.eq(restaurant_id))
                .filter(restaurants::owner_id.eq(owner_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
