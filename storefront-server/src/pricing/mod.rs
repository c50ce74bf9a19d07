//! Order pricing
//!
//! Quotes an order against the current catalog: per-line unit price is
//! the product price plus the price of every requested extra, the line
//! total weighs that by quantity, and the order total is the sum over
//! lines. All catalog reads happen up front so a quote is computed
//! against one consistent snapshot.

mod calculator;

pub use calculator::{
    ItemRequest, OrderQuote, PricedItem, PricingError, quote_order, to_minor_units,
};
