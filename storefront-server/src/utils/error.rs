//! Unified error handling
//!
//! Every failure in this system is scoped to a single request and
//! surfaced as an HTTP status plus an `{"error": "..."}` body, the
//! same shape the payment boundary uses. Nothing here is fatal at
//! the process level.
//!
//! | Variant | Status |
//! |---------|--------|
//! | Validation | 400 |
//! | BusinessRule | 400 |
//! | NotFound | 404 |
//! | Payment | 500 |
//! | Database | 500 |
//! | Internal | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;
use crate::db::store::StorageError;
use crate::payment::PaymentError;
use crate::pricing::PricingError;

/// Error body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or incomplete request (400)
    #[error("{0}")]
    Validation(String),

    /// Legal request, illegal state change (400)
    #[error("{0}")]
    BusinessRule(String),

    /// Unknown product, order, or code (404)
    #[error("{0} not found")]
    NotFound(String),

    /// Payment processor rejection or network failure (500)
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Store read/write failure (500)
    #[error("Database error: {0}")]
    Database(String),

    /// Anything else (500)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BusinessRule(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Payment(_) | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(resource) => Self::NotFound(resource),
            RepoError::InvalidTransition(message) => Self::BusinessRule(message),
            RepoError::Database(message) => Self::Database(message),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        // Catalog misses abort the whole calculation before any
        // payment is attempted, surfaced as a 400 to the form.
        Self::Validation(err.to_string())
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;
