//! Shopping cart contents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ProductId, Quantity};

/// Product quantities held by one account.
///
/// Every line holds a [`Quantity`], so no line can drop below 1, including
/// carts read back from JSON. The cart does not know about the catalog;
/// callers check that the product exists before adding it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<ProductId, Quantity>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: BTreeMap::new(),
        }
    }

    /// Merge `quantity` units of `product_id` into the cart.
    ///
    /// Repeated adds accumulate. The line saturates at `u32::MAX`.
    /// Returns the new quantity for the product.
    pub fn add(&mut self, product_id: ProductId, quantity: Quantity) -> u32 {
        let line = self
            .lines
            .entry(product_id)
            .and_modify(|line| *line = line.saturating_add(quantity))
            .or_insert(quantity);
        line.get()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Quantity held for a product, if any.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.lines.get(&product_id).copied().map(Quantity::get)
    }

    /// Sum of all quantities. Computed on every call.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.values().map(|q| u64::from(q.get())).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn qty(n: i64) -> Quantity {
        Quantity::try_from(n).unwrap()
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert_eq!(cart, Cart::default());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_add_creates_line() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(ProductId::new(1), qty(2)), 2);
        assert_eq!(cart.quantity_of(ProductId::new(1)), Some(2));
        assert_eq!(cart.quantity_of(ProductId::new(2)), None);
    }

    #[test]
    fn test_add_accumulates_in_any_order() {
        let mut a = Cart::new();
        a.add(ProductId::new(1), qty(2));
        a.add(ProductId::new(1), qty(3));

        let mut b = Cart::new();
        b.add(ProductId::new(1), qty(3));
        b.add(ProductId::new(1), qty(2));

        assert_eq!(a, b);
        assert_eq!(a.quantity_of(ProductId::new(1)), Some(5));
    }

    #[test]
    fn test_total_items_sums_all_lines() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), qty(2));
        cart.add(ProductId::new(3), qty(4));
        assert_eq!(cart.total_items(), 6);
    }

    #[test]
    fn test_add_saturates() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), qty(i64::from(u32::MAX)));
        assert_eq!(cart.add(ProductId::new(1), qty(10)), u32::MAX);
    }

    #[test]
    fn test_total_items_does_not_overflow_u32() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), qty(i64::from(u32::MAX)));
        cart.add(ProductId::new(2), qty(1));
        assert_eq!(cart.total_items(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), qty(2));
        cart.clear();
        assert_eq!(cart, Cart::new());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn test_serializes_as_map() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), qty(5));
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"{"1":5}"#);
    }

    #[test]
    fn test_deserialize_keeps_quantities() {
        let cart: Cart = serde_json::from_str(r#"{"1":2,"3":4}"#).unwrap();
        assert_eq!(cart.quantity_of(ProductId::new(1)), Some(2));
        assert_eq!(cart.total_items(), 6);
    }

    #[test]
    fn test_deserialize_rejects_empty_lines() {
        assert!(serde_json::from_str::<Cart>(r#"{"1":0}"#).is_err());
        assert!(serde_json::from_str::<Cart>(r#"{"1":2,"2":0}"#).is_err());
        assert!(serde_json::from_str::<Cart>(r#"{"1":-3}"#).is_err());
    }
}
