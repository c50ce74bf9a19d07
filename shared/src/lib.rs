//! Shared types for the Cortado storefront
//!
//! Domain models and helpers used by the server and by any future
//! in-process client:
//!
//! - **models** (`models`): catalog, cart, and order entities
//! - **order codes** (`order_code`): short customer-facing codes
//! - **pickup slots** (`pickup`): fixed pickup time grid

pub mod models;
pub mod order_code;
pub mod pickup;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{CartItem, Extra, Order, OrderStatus, PaymentMethod, Product};
pub use order_code::generate_order_code;
