//! Cortado Storefront Server
//!
//! Online ordering backend for a small café: catalog, cart
//! consolidation, server-side order pricing, pickup codes, the order
//! status lifecycle with change notifications, and the payment intent
//! boundary.
//!
//! # Module structure
//!
//! ```text
//! storefront-server/src/
//! ├── core/      # Config, shared state, HTTP server
//! ├── api/       # HTTP routes and handlers
//! ├── db/        # Embedded store and typed repositories
//! ├── cart/      # Cart aggregation and persistence
//! ├── pricing/   # Catalog-backed order quoting
//! ├── tracking/  # Order status polling and change events
//! ├── payment/   # Payment processor boundary
//! └── utils/     # Errors, logging
//! ```

pub mod api;
pub mod cart;
pub mod core;
pub mod db;
pub mod payment;
pub mod pricing;
pub mod tracking;
pub mod utils;

// Re-export public types
pub use api::{OneshotResult, OneshotRouter};
pub use cart::{Cart, CartStore, MemoryCartStore, RedbCartStore};
pub use core::{Config, Server, ServerState};
pub use payment::{MockProcessor, PaymentError, PaymentIntent, PaymentProcessor, StripeProcessor};
pub use pricing::{ItemRequest, OrderQuote, PricingError};
pub use tracking::{StatusChange, StatusProbe, StatusWatcher, WatchHandle};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
