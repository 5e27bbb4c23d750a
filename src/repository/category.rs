use diesel::prelude::*;

use crate::domain::category::{
    CategoryListQuery, MenuCategory as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::models::category::{
    MenuCategory as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn get_category_by_id(
        &self,
        category_id: i32,
        restaurant_id: i32,
    ) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::menu_categories;

        let mut conn = self.conn()?;

        let category = menu_categories::table
            .filter(menu_categories::id.eq(category_id))
            .filter(menu_categories::restaurant_id.eq(restaurant_id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(DomainCategory::from))
    }

    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainCategory>)> {
        use crate::schema::menu_categories;

        let mut conn = self.conn()?;

        let mut count_query = menu_categories::table
            .filter(menu_categories::restaurant_id.eq(query.restaurant_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            count_query = count_query.filter(menu_categories::is_active.eq(true));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items_query = menu_categories::table
            .filter(menu_categories::restaurant_id.eq(query.restaurant_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if !query.include_inactive {
            items_query = items_query.filter(menu_categories::is_active.eq(true));
        }

        items_query = items_query.order((
            menu_categories::display_order.asc(),
            menu_categories::id.asc(),
        ));

        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1);
            let per_page = pagination.per_page as i64;
            let offset = ((page - 1) * pagination.per_page) as i64;
            items_query = items_query.offset(offset).limit(per_page);
        }

        let categories = items_query.load::<DbCategory>(&mut conn)?;
        let categories = categories.into_iter().map(DomainCategory::from).collect();

        Ok((total, categories))
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::menu_categories;

        let mut conn = self.conn()?;

        let insertable = DbNewCategory::from(new_category);

        let created = diesel::insert_into(menu_categories::table)
            .values(&insertable)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.into())
    }

    fn update_category(
        &self,
        category_id: i32,
        restaurant_id: i32,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::menu_categories;

        let mut conn = self.conn()?;

        let db_updates = DbUpdateCategory::from(updates);

        let target = menu_categories::table
            .filter(menu_categories::id.eq(category_id))
            .filter(menu_categories::restaurant_id.eq(restaurant_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_category(&self, category_id: i32, restaurant_id: i32) -> RepositoryResult<()> {
        use crate::schema::menu_categories;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            menu_categories::table
                .filter(menu_categories::id.eq(category_id))
                .filter(menu_categories::restaurant_id.eq(restaurant_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
