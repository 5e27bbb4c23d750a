use serde::{Deserialize, Serialize};

use crate::domain::item::MenuItem;

/// One line of a diner's cart. Identity is the underlying menu item id;
/// the name and unit price are captured at add time for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub item_id: i32,
    pub name: String,
    pub price_cents: i64,
    /// Always at least 1 while the line is present.
    pub quantity: i64,
}

impl CartLine {
    pub fn new(item_id: i32, name: impl Into<String>, price_cents: i64) -> Self {
        Self {
            item_id,
            name: name.into(),
            price_cents,
            quantity: 1,
        }
    }

    /// Line subtotal in the smallest currency unit.
    pub fn subtotal_cents(&self) -> i64 {
        self.price_cents * self.quantity
    }
}

impl From<&MenuItem> for CartLine {
    fn from(item: &MenuItem) -> Self {
        CartLine::new(item.id, item.name.clone(), item.price_cents)
    }
}

/// Session-scoped cart: an ordered collection of lines keyed by item
/// identity. First-insertion order is preserved for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of the given line's item. An existing line with the
    /// same item id is incremented; otherwise the line is appended with
    /// quantity 1.
    pub fn add(&mut self, line: CartLine) {
        match self.find_mut(line.item_id) {
            Some(existing) => existing.quantity += 1,
            None => self.lines.push(CartLine {
                quantity: 1,
                ..line
            }),
        }
    }

    /// Remove one unit of the given item. A line at quantity 1 is dropped
    /// entirely; an absent item id is a no-op.
    pub fn remove(&mut self, item_id: i32) {
        if let Some(index) = self.lines.iter().position(|line| line.item_id == item_id) {
            if self.lines[index].quantity > 1 {
                self.lines[index].quantity -= 1;
            } else {
                self.lines.remove(index);
            }
        }
    }

    /// Set an item's quantity directly. A quantity of zero or less removes
    /// the line; setting a quantity for an absent item inserts the line.
    pub fn set_quantity(&mut self, line: CartLine, quantity: i64) {
        if quantity <= 0 {
            self.lines.retain(|existing| existing.item_id != line.item_id);
            return;
        }

        match self.find_mut(line.item_id) {
            Some(existing) => existing.quantity = quantity,
            None => self.lines.push(CartLine { quantity, ..line }),
        }
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of unit price times quantity over all lines.
    pub fn total_cents(&self) -> i64 {
        self.lines.iter().map(CartLine::subtotal_cents).sum()
    }

    /// Sum of all quantities; drives the cart badge indicator.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    fn find_mut(&mut self, item_id: i32) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item_id == item_id)
    }
}

/// Parse a currency-prefixed price label ("₹350", "$12.50") into the
/// smallest currency unit. Returns `None` when no digits are present or
/// the fractional part has more than two digits.
pub fn parse_price_cents(label: &str) -> Option<i64> {
    let trimmed = label.trim();
    let digits: String = trimmed
        .chars()
        .skip_while(|ch| !ch.is_ascii_digit())
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();

    if digits.is_empty() {
        return None;
    }

    match digits.split_once('.') {
        None => digits.parse::<i64>().ok().map(|units| units * 100),
        Some((units, fraction)) => {
            if fraction.is_empty() || fraction.len() > 2 || fraction.contains('.') {
                return None;
            }
            let units = units.parse::<i64>().ok()?;
            let mut fraction_cents = fraction.parse::<i64>().ok()?;
            if fraction.len() == 1 {
                fraction_cents *= 10;
            }
            Some(units * 100 + fraction_cents)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item_id: i32, price_cents: i64) -> CartLine {
        CartLine::new(item_id, format!("item-{item_id}"), price_cents)
    }

    #[test]
    fn add_increments_existing_line() {
        let mut cart = Cart::new();

        for _ in 0..3 {
            cart.add(line(1, 350));
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total_cents(), 1050);
    }

    #[test]
    fn add_then_remove_restores_previous_state() {
        let mut cart = Cart::new();
        cart.add(line(1, 350));
        let before = cart.clone();

        cart.add(line(2, 90));
        cart.remove(2);

        assert_eq!(cart, before);
    }

    #[test]
    fn remove_decrements_exactly_one_unit() {
        let mut cart = Cart::new();
        cart.add(line(1, 350));
        cart.add(line(1, 350));

        cart.remove(1);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.remove(1);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_absent_item_is_noop() {
        let mut cart = Cart::new();
        cart.add(line(1, 350));

        cart.remove(42);

        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn set_quantity_zero_removes_line_regardless_of_prior_quantity() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(line(1, 350));
        }

        cart.set_quantity(line(1, 350), 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_inserts_absent_line() {
        let mut cart = Cart::new();

        cart.set_quantity(line(7, 220), 4);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 4);
        assert_eq!(cart.total_cents(), 880);
    }

    #[test]
    fn changing_one_line_does_not_perturb_others() {
        let mut cart = Cart::new();
        cart.add(line(1, 350));
        cart.add(line(2, 90));
        cart.add(line(3, 60));

        cart.set_quantity(line(2, 90), 10);

        let subtotals: Vec<i64> = cart.lines().iter().map(CartLine::subtotal_cents).collect();
        assert_eq!(subtotals, vec![350, 900, 60]);
        assert_eq!(cart.total_cents(), 1310);
    }

    #[test]
    fn first_insertion_order_is_preserved() {
        let mut cart = Cart::new();
        cart.add(line(3, 60));
        cart.add(line(1, 350));
        cart.add(line(3, 60));
        cart.add(line(2, 90));

        let ids: Vec<i32> = cart.lines().iter().map(|l| l.item_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn spice_garden_double_add_totals_700() {
        let mut cart = Cart::new();
        let fish_curry = CartLine::new(1, "Fish Curry", 350);

        cart.add(fish_curry.clone());
        cart.add(fish_curry);

        assert_eq!(cart.total_cents(), 700);
    }

    #[test]
    fn parse_price_cents_accepts_currency_prefixes() {
        assert_eq!(parse_price_cents("₹350"), Some(35000));
        assert_eq!(parse_price_cents("$12.50"), Some(1250));
        assert_eq!(parse_price_cents(" 90 "), Some(9000));
        assert_eq!(parse_price_cents("Rs. 220"), Some(22000));
        assert_eq!(parse_price_cents("3.5"), Some(350));
    }

    #[test]
    fn parse_price_cents_rejects_garbage() {
        assert_eq!(parse_price_cents(""), None);
        assert_eq!(parse_price_cents("free"), None);
        assert_eq!(parse_price_cents("1.234"), None);
        assert_eq!(parse_price_cents("1.2.3"), None);
    }

    #[test]
    fn currency_string_and_numeric_paths_agree() {
        let parsed = parse_price_cents("₹3.50").expect("price should parse");
        assert_eq!(parsed, 350);
    }
}
