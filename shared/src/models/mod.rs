//! Data models
//!
//! Shared between storefront-server and API consumers. Monetary
//! amounts are `rust_decimal::Decimal` and serialize as JSON numbers.

pub mod cart;
pub mod extra;
pub mod order;
pub mod product;

// Re-exports
pub use cart::*;
pub use extra::*;
pub use order::*;
pub use product::*;
