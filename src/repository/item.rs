use diesel::prelude::*;

use crate::domain::item::{
    MenuItem as DomainMenuItem, MenuItemListQuery, NewMenuItem as DomainNewMenuItem,
    UpdateMenuItem as DomainUpdateMenuItem,
};
use crate::models::item::{
    MenuItem as DbMenuItem, NewMenuItem as DbNewMenuItem, UpdateMenuItem as DbUpdateMenuItem,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, MenuItemReader, MenuItemWriter};

impl MenuItemReader for DieselRepository {
    fn get_menu_item_by_id(
        &self,
        item_id: i32,
        restaurant_id: i32,
    ) -> RepositoryResult<Option<DomainMenuItem>> {
        use crate::schema::menu_items;

        let mut conn = self.conn()?;

        let item = menu_items::table
            .filter(menu_items::id.eq(item_id))
            .filter(menu_items::restaurant_id.eq(restaurant_id))
            .first::<DbMenuItem>(&mut conn)
            .optional()?;

        Ok(item.map(DomainMenuItem::from))
    }

    fn list_menu_items(
        &self,
        query: MenuItemListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainMenuItem>)> {
        use crate::schema::menu_items;

        let mut conn = self.conn()?;

        let mut count_query = menu_items::table
            .filter(menu_items::restaurant_id.eq(query.restaurant_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            count_query = count_query.filter(menu_items::category_id.eq(category_id));
        }

        if !query.include_unavailable {
            count_query = count_query.filter(menu_items::is_available.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                menu_items::name
                    .like(pattern.clone())
                    .or(menu_items::description.like(pattern)),
            );
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut items_query = menu_items::table
            .filter(menu_items::restaurant_id.eq(query.restaurant_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(category_id) = query.category_id {
            items_query = items_query.filter(menu_items::category_id.eq(category_id));
        }

        if !query.include_unavailable {
            items_query = items_query.filter(menu_items::is_available.eq(true));
        }

        if let Some(term) = query.search.as_ref() {
            let pattern = format!("%{}%", term);
            items_query = items_query.filter(
                menu_items::name
                    .like(pattern.clone())
                    .or(menu_items::description.like(pattern)),
            );
        }

        items_query = items_query.order((menu_items::display_order.asc(), menu_items::id.asc()));

        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1);
            let per_page = pagination.per_page as i64;
            let offset = ((page - 1) * pagination.per_page) as i64;
            items_query = items_query.offset(offset).limit(per_page);
        }

        let items = items_query.load::<DbMenuItem>(&mut conn)?;
        let items = items.into_iter().map(DomainMenuItem::from).collect();

        Ok((total, items))
    }
}

impl MenuItemWriter for DieselRepository {
    fn create_menu_item(&self, new_item: &DomainNewMenuItem) -> RepositoryResult<DomainMenuItem> {
        use crate::schema::menu_items;

        let mut conn = self.conn()?;

        let insertable = DbNewMenuItem::from(new_item);

        let created = diesel::insert_into(menu_items::table)
            .values(&insertable)
            .get_result::<DbMenuItem>(&mut conn)?;

        Ok(created.into())
    }

    fn update_menu_item(
        &self,
        item_id: i32,
        restaurant_id: i32,
        updates: &DomainUpdateMenuItem,
    ) -> RepositoryResult<DomainMenuItem> {
        use crate::schema::menu_items;

        let mut conn = self.conn()?;

        let db_updates = DbUpdateMenuItem::from(updates);

        let target = menu_items::table
            .filter(menu_items::id.eq(item_id))
            .filter(menu_items::restaurant_id.eq(restaurant_id));

        let updated = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbMenuItem>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_menu_item(&self, item_id: i32, restaurant_id: i32) -> RepositoryResult<()> {
        use crate::schema::menu_items;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            menu_items::table
                .filter(menu_items::id.eq(item_id))
                .filter(menu_items::restaurant_id.eq(restaurant_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn delete_menu_items_by_category(
        &self,
        category_id: i32,
        restaurant_id: i32,
    ) -> RepositoryResult<usize> {
        use crate::schema::menu_items;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            menu_items::table
                .filter(menu_items::category_id.eq(category_id))
                .filter(menu_items::restaurant_id.eq(restaurant_id)),
        )
        .execute(&mut conn)?;

        Ok(deleted)
    }
}
