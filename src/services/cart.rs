use crate::domain::cart::{Cart, CartLine};
use crate::repository::{MenuItemReader, RestaurantReader};
use crate::services::{ServiceError, ServiceResult};

/// Session key the serialized cart is stored under.
pub const CART_SESSION_KEY: &str = "menufy_cart";

/// Summary returned by the place-order stub.
#[derive(Debug, PartialEq, Eq)]
pub struct OrderSummary {
    pub item_count: i64,
    pub total_cents: i64,
}

/// Add one unit of a menu item to the cart, resolving the item through the
/// restaurant slug so foreign or unavailable items can never be added.
pub fn add_item<R>(repo: &R, cart: &mut Cart, slug: &str, item_id: i32) -> ServiceResult<()>
where
    R: RestaurantReader + MenuItemReader + ?Sized,
{
    let line = resolve_line(repo, slug, item_id)?;
    cart.add(line);
    Ok(())
}

/// Set a menu item's quantity directly; zero or negative removes the line.
pub fn set_quantity<R>(
    repo: &R,
    cart: &mut Cart,
    slug: &str,
    item_id: i32,
    quantity: i64,
) -> ServiceResult<()>
where
    R: RestaurantReader + MenuItemReader + ?Sized,
{
    if quantity <= 0 {
        cart.set_quantity(CartLine::new(item_id, "", 0), 0);
        return Ok(());
    }

    let line = resolve_line(repo, slug, item_id)?;
    cart.set_quantity(line, quantity);
    Ok(())
}

/// Terminal checkout stub: empties the cart and reports what was "ordered".
/// Nothing is persisted.
pub fn place_order(cart: &mut Cart) -> ServiceResult<OrderSummary> {
    if cart.is_empty() {
        return Err(ServiceError::Form("your cart is empty".to_string()));
    }

    let summary = OrderSummary {
        item_count: cart.item_count(),
        total_cents: cart.total_cents(),
    };
    cart.clear();

    Ok(summary)
}

fn resolve_line<R>(repo: &R, slug: &str, item_id: i32) -> ServiceResult<CartLine>
where
    R: RestaurantReader + MenuItemReader + ?Sized,
{
    let restaurant = repo
        .get_restaurant_by_slug(slug)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let item = repo
        .get_menu_item_by_id(item_id, restaurant.id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if !item.is_available {
        return Err(ServiceError::NotFound);
    }

    Ok(CartLine::from(&item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::item::MenuItem;
    use crate::domain::restaurant::Restaurant;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockMenuItemReader, MockRestaurantReader};
    use crate::repository::{MenuItemReader, RestaurantReader};

    struct MockCartRepo {
        restaurants: MockRestaurantReader,
        items: MockMenuItemReader,
    }

    impl MockCartRepo {
        fn new() -> Self {
            Self {
                restaurants: MockRestaurantReader::new(),
                items: MockMenuItemReader::new(),
            }
        }
    }

    impl RestaurantReader for MockCartRepo {
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

    impl MenuItemReader for MockCartRepo {
        fn get_menu_item_by_id(
            &self,
            item_id: i32,
            restaurant_id: i32,
        ) -> RepositoryResult<Option<MenuItem>> {
            self.items.get_menu_item_by_id(item_id, restaurant_id)
        }

        fn list_menu_items(
            &self,
            query: crate::domain::item::MenuItemListQuery,
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

    fn sample_item(id: i32, restaurant_id: i32, price_cents: i64, available: bool) -> MenuItem {
        MenuItem {
            id,
            restaurant_id,
            category_id: 10,
            name: "Fish Curry".to_string(),
            description: None,
            price_cents,
            is_veg: false,
            is_spicy: true,
            is_featured: false,
            is_available: available,
            display_order: 0,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn add_item_twice_totals_twice_the_price() {
        let mut repo = MockCartRepo::new();
        repo.restaurants
            .expect_get_restaurant_by_slug()
            .times(2)
            .returning(|_| Ok(Some(sample_restaurant(1))));
        repo.items
            .expect_get_menu_item_by_id()
            .times(2)
            .returning(|item_id, restaurant_id| {
                Ok(Some(sample_item(item_id, restaurant_id, 350, true)))
            });

        let mut cart = Cart::new();
        add_item(&repo, &mut cart, "spice-garden", 7).expect("first add");
        add_item(&repo, &mut cart, "spice-garden", 7).expect("second add");

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_cents(), 700);
    }

    #[test]
    fn add_item_rejects_unavailable_item() {
        let mut repo = MockCartRepo::new();
        repo.restaurants
            .expect_get_restaurant_by_slug()
            .times(1)
            .returning(|_| Ok(Some(sample_restaurant(1))));
        repo.items
            .expect_get_menu_item_by_id()
            .times(1)
            .returning(|item_id, restaurant_id| {
                Ok(Some(sample_item(item_id, restaurant_id, 350, false)))
            });

        let mut cart = Cart::new();
        let result = add_item(&repo, &mut cart, "spice-garden", 7);

        assert!(matches!(result, Err(ServiceError::NotFound)));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_zero_skips_item_lookup() {
        let repo = MockCartRepo::new();

        let mut cart = Cart::new();
        cart.add(CartLine::new(7, "Fish Curry", 350));

        set_quantity(&repo, &mut cart, "spice-garden", 7, 0).expect("expected success");

        assert!(cart.is_empty());
    }

    #[test]
    fn place_order_clears_cart_and_reports_totals() {
        let mut cart = Cart::new();
        cart.add(CartLine::new(7, "Fish Curry", 350));
        cart.add(CartLine::new(7, "Fish Curry", 350));

        let summary = place_order(&mut cart).expect("expected success");

        assert_eq!(
            summary,
            OrderSummary {
                item_count: 2,
                total_cents: 700
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn place_order_rejects_empty_cart() {
        let mut cart = Cart::new();

        let result = place_order(&mut cart);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
