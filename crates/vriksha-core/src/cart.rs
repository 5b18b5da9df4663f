//! Cart state engine.
//!
//! The [`Cart`] is the sole owner of its [`CartLine`]s and exposes
//! operations that are safe to call repeatedly and in any order from UI
//! event handlers. Every operation is total: absent ids, zero and negative
//! quantities are handled, never rejected.
//!
//! # Invariants
//!
//! - At most one line exists per product id.
//! - Every stored line has `quantity >= 1`; driving a quantity to zero or
//!   below removes the line.
//! - Aggregates ([`Cart::total_item_count`], [`Cart::total_price`]) are
//!   recomputed from the lines on every call.
//!
//! # Repeated adds
//!
//! Adding an id that is already in the cart only increments its quantity.
//! The name, unit price, and image recorded on first add are kept, so a
//! catalog price change mid-session does not silently reprice a line that
//! is already in the cart.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use vriksha_core::cart::{format_price, Cart};
//! use vriksha_core::models::NewLine;
//!
//! let mut cart = Cart::new();
//! let snake = NewLine::new(1, "Snake Plant", Decimal::new(2500, 2), "/snake.jpg");
//! cart.add_item(snake.clone(), 1);
//! cart.add_item(snake, 2);
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.total_item_count(), 3);
//! assert_eq!(format_price(cart.total_price()), "75.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};

use crate::catalog::Product;
use crate::models::{CartLine, NewLine, ProductId};

/// In-memory shopping cart for one storefront session.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of a product.
    ///
    /// Increments the existing line for `line.id` or inserts a new one.
    /// A quantity of `0` counts as the default of one unit.
    pub fn add_item(&mut self, line: NewLine, quantity: u32) {
        let quantity = quantity.max(1);

        if let Some(existing) = self.lines.iter_mut().find(|l| l.id == line.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return;
        }

        self.lines.push(CartLine {
            id: line.id,
            name: line.name,
            unit_price: line.unit_price,
            image: line.image,
            quantity,
        });
    }

    /// Add a catalog product to the cart.
    pub fn add_product(&mut self, product: &Product, quantity: u32) {
        self.add_item(
            NewLine::new(product.id, &product.name, product.price, &product.image),
            quantity,
        );
    }

    /// Remove the line for `id`. No-op when absent.
    pub fn remove_item(&mut self, id: ProductId) {
        self.lines.retain(|l| l.id != id);
    }

    /// Set the quantity of `id` exactly.
    ///
    /// `quantity <= 0` removes the line. Absent ids are ignored.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line quantities.
    pub fn total_item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of `unit_price × quantity` over all lines.
    pub fn total_price(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Format a money amount with exactly two decimal places.
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: ProductId, name: &str, cents: i64) -> NewLine {
        NewLine::new(id, name, Decimal::new(cents, 2), format!("/img/{}.jpg", id))
    }

    #[test]
    fn test_repeated_add_accumulates_single_line() {
        let mut cart = Cart::new();
        for _ in 0..7 {
            cart.add_item(line(4, "Peace Lily", 3500), 1);
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(4).map(|l| l.quantity), Some(7));
    }

    #[test]
    fn test_snake_plant_scenario() {
        let mut cart = Cart::new();
        cart.add_item(line(1, "Snake Plant", 2500), 1);
        cart.add_item(line(1, "Snake Plant", 2500), 2);

        assert_eq!(cart.len(), 1);
        let l = cart.get(1).unwrap();
        assert_eq!(l.quantity, 3);
        assert_eq!(cart.total_price(), Decimal::new(7500, 2));
        assert_eq!(format_price(cart.total_price()), "75.00");
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_item(line(2, "Pothos", 2000), 1);
        cart.set_quantity(2, 0);
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_set_quantity_negative_never_leaves_negative_line() {
        let mut cart = Cart::new();
        cart.add_item(line(3, "Rubber Plant", 5500), 4);
        let q = i64::from(cart.get(3).unwrap().quantity);
        cart.set_quantity(3, q - q - 1);
        assert!(!cart.contains(3));
    }

    #[test]
    fn test_set_quantity_is_not_additive() {
        let mut cart = Cart::new();
        cart.add_item(line(5, "Monstera", 4500), 3);
        cart.set_quantity(5, 2);
        assert_eq!(cart.get(5).unwrap().quantity, 2);
    }

    #[test]
    fn test_set_quantity_absent_is_noop() {
        let mut cart = Cart::new();
        cart.set_quantity(99, 5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(line(1, "Snake Plant", 2500), 1);
        cart.remove_item(42);
        assert_eq!(cart.len(), 1);
        cart.remove_item(1);
        cart.remove_item(1);
        assert!(!cart.contains(1));
    }

    #[test]
    fn test_zero_quantity_add_counts_as_one() {
        let mut cart = Cart::new();
        cart.add_item(line(6, "Fiddle Leaf Fig", 8500), 0);
        assert_eq!(cart.get(6).unwrap().quantity, 1);
    }

    #[test]
    fn test_repeated_add_keeps_first_metadata() {
        let mut cart = Cart::new();
        cart.add_item(line(1, "Snake Plant", 2500), 1);
        cart.add_item(line(1, "Snake Plant (sale)", 1000), 1);

        let l = cart.get(1).unwrap();
        assert_eq!(l.name, "Snake Plant");
        assert_eq!(l.unit_price, Decimal::new(2500, 2));
        assert_eq!(cart.total_price(), Decimal::new(5000, 2));
    }

    #[test]
    fn test_aggregates_track_mixed_operations() {
        let mut cart = Cart::new();
        cart.add_item(line(1, "Snake Plant", 2500), 2);
        cart.add_item(line(2, "Pothos", 2000), 1);
        cart.add_item(line(3, "Fiddle Leaf Fig", 8500), 1);
        cart.set_quantity(2, 4);
        cart.remove_item(3);
        cart.add_item(line(1, "Snake Plant", 2500), 1);

        let expected_count: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
        let expected_price: Decimal = cart
            .lines()
            .iter()
            .map(|l| l.unit_price * Decimal::from(l.quantity))
            .sum();
        assert_eq!(cart.total_item_count(), expected_count);
        assert_eq!(cart.total_item_count(), 7);
        assert_eq!(cart.total_price(), expected_price);
        assert_eq!(format_price(cart.total_price()), "155.00");
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add_item(line(1, "Snake Plant", 2500), 2);
        cart.add_item(line(2, "Pothos", 2000), 1);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_no_float_artifacts() {
        let mut cart = Cart::new();
        cart.add_item(line(7, "Seed Pack", 10), 1);
        cart.add_item(line(8, "Seed Pack XL", 20), 1);
        assert_eq!(cart.total_price(), Decimal::new(30, 2));
        assert_eq!(format_price(cart.total_price()), "0.30");
    }

    #[test]
    fn test_format_price_rounds_half_away_from_zero() {
        assert_eq!(format_price(Decimal::new(12345, 3)), "12.35");
        assert_eq!(format_price(Decimal::ZERO), "0.00");
        assert_eq!(format_price(Decimal::from(45)), "45.00");
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let mut cart = Cart::new();
        cart.add_item(line(1, "Snake Plant", 2500), u32::MAX);
        cart.add_item(line(1, "Snake Plant", 2500), 5);
        assert_eq!(cart.get(1).unwrap().quantity, u32::MAX);
        cart.set_quantity(1, i64::MAX);
        assert_eq!(cart.get(1).unwrap().quantity, u32::MAX);
    }
}
