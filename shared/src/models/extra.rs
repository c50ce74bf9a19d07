//! Extra Model
//!
//! Extras are global add-ons, not scoped to a product. Cart items
//! reference them by `name`, not by `id`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Extra entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Extra {
    pub id: String,
    /// Matching key used by cart items
    pub name: String,
    /// Additional price on top of the product base price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Create extra payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraCreate {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Update extra payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExtraUpdate {
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}
