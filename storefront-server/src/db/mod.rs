//! Persistence layer
//!
//! A redb-backed document store ([`store`]) and typed repositories
//! over it ([`repository`]). The rest of the server only sees the
//! repositories.

pub mod repository;
pub mod store;

pub use repository::{ExtraRepository, OrderRepository, ProductRepository, RepoError, RepoResult};
pub use store::{StorageError, StorageResult, StoreDb};
