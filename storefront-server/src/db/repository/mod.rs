//! Repository Module
//!
//! Typed CRUD operations over the document store, one repository per
//! entity.

pub mod extra;
pub mod order;
pub mod product;

// Re-exports
pub use extra::ExtraRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;

use thiserror::Error;

use crate::db::store::StorageError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Illegal status transition: {0}")]
    InvalidTransition(String),
}

impl From<StorageError> for RepoError {
    fn from(err: StorageError) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
