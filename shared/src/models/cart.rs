//! Cart item snapshot

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A cart line item
///
/// Name, price and image are denormalized at add time so the cart
/// (and later the order) keeps rendering even if the catalog entry
/// changes or disappears. `price` already includes selected extras.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Selected extra names, stored in selection order
    #[serde(default)]
    pub extras: Vec<String>,
}

impl CartItem {
    /// Line total: unit price (extras included) times quantity
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Whether this line merges with `(product_id, extras)`
    pub fn matches(&self, product_id: &str, extras: &[String]) -> bool {
        self.product_id == product_id && extras_equal(&self.extras, extras)
    }
}

/// Extras-set equality: order-insensitive, repeats significant.
///
/// Sorted-sequence comparison treats the two lists as multisets of
/// names. A repeated name counts twice and is not deduplicated.
pub fn extras_equal(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut sorted_a: Vec<&str> = a.iter().map(String::as_str).collect();
    let mut sorted_b: Vec<&str> = b.iter().map(String::as_str).collect();
    sorted_a.sort_unstable();
    sorted_b.sort_unstable();
    sorted_a == sorted_b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extras_equal_ignores_order() {
        assert!(extras_equal(
            &names(&["Canela", "Leche de almendra"]),
            &names(&["Leche de almendra", "Canela"]),
        ));
    }

    #[test]
    fn test_extras_equal_empty() {
        assert!(extras_equal(&[], &[]));
    }

    #[test]
    fn test_extras_unequal_lengths() {
        assert!(!extras_equal(&names(&["Canela"]), &[]));
    }

    #[test]
    fn test_repeated_name_is_significant() {
        // A double shot is not the same selection as a single shot
        assert!(!extras_equal(
            &names(&["Shot extra", "Shot extra"]),
            &names(&["Shot extra"]),
        ));
        assert!(extras_equal(
            &names(&["Shot extra", "Shot extra"]),
            &names(&["Shot extra", "Shot extra"]),
        ));
    }

    #[test]
    fn test_line_total() {
        let item = CartItem {
            product_id: "p1".into(),
            name: "Latte".into(),
            price: Decimal::new(6050, 2), // 60.50
            image: String::new(),
            quantity: 3,
            notes: None,
            extras: vec![],
        };
        assert_eq!(item.line_total(), Decimal::new(18150, 2));
    }
}
