use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use shared::models::{Extra, Product};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    /// The request names a product the catalog does not have. The
    /// whole quote is rejected; no partial totals ever leave here.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A line carries a quantity below 1
    #[error("Invalid quantity for product {0}")]
    InvalidQuantity(String),
}

/// One requested line, as sent by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub product_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub extras: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A priced line: catalog name and unit price resolved server-side
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    pub product_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: u32,
    pub extras: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuote {
    pub items: Vec<PricedItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Price a batch of requested lines against a catalog snapshot.
///
/// Unit price = product price + sum of matched extra prices; extras
/// match by display name. An extra name with no catalog entry prices
/// at zero and stays on the line, so a stale menu never blocks an
/// order. An unknown product id or a quantity below 1 fails the
/// whole quote.
pub fn quote_order(
    products: &HashMap<String, Product>,
    extras_by_name: &HashMap<String, Extra>,
    items: &[ItemRequest],
) -> Result<OrderQuote, PricingError> {
    let mut priced = Vec::with_capacity(items.len());
    let mut total = Decimal::ZERO;

    for item in items {
        let product = products
            .get(&item.product_id)
            .ok_or_else(|| PricingError::ProductNotFound(item.product_id.clone()))?;
        if item.quantity < 1 {
            return Err(PricingError::InvalidQuantity(item.product_id.clone()));
        }

        let mut unit_price = product.price;
        for name in &item.extras {
            match extras_by_name.get(name) {
                Some(extra) => unit_price += extra.price,
                None => {
                    tracing::warn!(extra = %name, product = %product.name, "Unknown extra priced at zero");
                }
            }
        }

        let line_total = unit_price * Decimal::from(item.quantity);
        total += line_total;
        priced.push(PricedItem {
            product_id: item.product_id.clone(),
            name: product.name.clone(),
            unit_price,
            quantity: item.quantity,
            extras: item.extras.clone(),
            notes: item.notes.clone(),
            line_total,
        });
    }

    Ok(OrderQuote {
        items: priced,
        total,
    })
}

/// Convert a major-unit amount to integer minor units (cents),
/// rounding half away from zero. Card processors take cents.
/// Amounts that do not fit in an i64 saturate rather than collapsing
/// to zero, so an absurd total still shows up as absurd downstream.
pub fn to_minor_units(amount: Decimal) -> i64 {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|cents| cents.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|cents| cents.to_i64())
        .unwrap_or(if amount.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: Decimal) -> Product {
        Product {
            id: id.into(),
            name: id.to_uppercase(),
            description: String::new(),
            price,
            category: "cafe".into(),
            image: String::new(),
            available: true,
        }
    }

    fn extra(name: &str, price: Decimal) -> Extra {
        Extra {
            id: name.to_lowercase(),
            name: name.into(),
            price,
        }
    }

    fn catalog() -> (HashMap<String, Product>, HashMap<String, Extra>) {
        let products = [
            product("a", Decimal::from(50)),
            product("b", Decimal::from(30)),
        ]
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();
        let extras = [extra("Leche de almendra", Decimal::from(10))]
            .into_iter()
            .map(|e| (e.name.clone(), e))
            .collect();
        (products, extras)
    }

    fn request(product_id: &str, quantity: u32, extras: &[&str]) -> ItemRequest {
        ItemRequest {
            product_id: product_id.into(),
            quantity,
            extras: extras.iter().map(|s| s.to_string()).collect(),
            notes: None,
        }
    }

    #[test]
    fn test_quote_totals_products_and_extras() {
        // 2 × (50 + 10) + 1 × 30 = 150
        let (products, extras) = catalog();
        let quote = quote_order(
            &products,
            &extras,
            &[
                request("a", 2, &["Leche de almendra"]),
                request("b", 1, &[]),
            ],
        )
        .unwrap();

        assert_eq!(quote.total, Decimal::from(150));
        assert_eq!(quote.items[0].unit_price, Decimal::from(60));
        assert_eq!(quote.items[0].line_total, Decimal::from(120));
        assert_eq!(quote.items[1].line_total, Decimal::from(30));
    }

    #[test]
    fn test_quote_resolves_name_from_catalog() {
        let (products, extras) = catalog();
        let quote = quote_order(&products, &extras, &[request("a", 1, &[])]).unwrap();
        assert_eq!(quote.items[0].name, "A");
    }

    #[test]
    fn test_unknown_product_rejects_whole_quote() {
        let (products, extras) = catalog();
        let err = quote_order(
            &products,
            &extras,
            &[request("a", 1, &[]), request("missing", 1, &[])],
        )
        .unwrap_err();

        assert!(matches!(err, PricingError::ProductNotFound(id) if id == "missing"));
    }

    #[test]
    fn test_zero_quantity_rejects_whole_quote() {
        let (products, extras) = catalog();
        let err = quote_order(
            &products,
            &extras,
            &[request("a", 1, &[]), request("b", 0, &[])],
        )
        .unwrap_err();

        assert!(matches!(err, PricingError::InvalidQuantity(id) if id == "b"));
    }

    #[test]
    fn test_unknown_extra_prices_at_zero() {
        let (products, extras) = catalog();
        let quote = quote_order(
            &products,
            &extras,
            &[request("a", 1, &["Chispas doradas", "Leche de almendra"])],
        )
        .unwrap();

        assert_eq!(quote.total, Decimal::from(60));
        // The line keeps the unmatched extra for the barista to read
        assert_eq!(quote.items[0].extras.len(), 2);
    }

    #[test]
    fn test_repeated_extra_counts_twice() {
        let (products, extras) = catalog();
        let quote = quote_order(
            &products,
            &extras,
            &[request("a", 1, &["Leche de almendra", "Leche de almendra"])],
        )
        .unwrap();

        assert_eq!(quote.total, Decimal::from(70));
    }

    #[test]
    fn test_empty_request_quotes_zero() {
        let (products, extras) = catalog();
        let quote = quote_order(&products, &extras, &[]).unwrap();
        assert!(quote.items.is_empty());
        assert_eq!(quote.total, Decimal::ZERO);
    }

    #[test]
    fn test_minor_units_rounds_midpoint_away_from_zero() {
        assert_eq!(to_minor_units(Decimal::from(150)), 15000);
        assert_eq!(to_minor_units(Decimal::new(555, 1)), 5550); // 55.5
        assert_eq!(to_minor_units(Decimal::new(5, 3)), 1); // 0.005 rounds up
        assert_eq!(to_minor_units(Decimal::new(4, 3)), 0); // 0.004 rounds down
    }

    #[test]
    fn test_minor_units_saturate_out_of_range() {
        assert_eq!(to_minor_units(Decimal::MAX), i64::MAX);
        assert_eq!(to_minor_units(Decimal::MIN), i64::MIN);
    }
}
