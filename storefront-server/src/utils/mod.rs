//! Utility module
//!
//! - [`AppError`] / [`AppResult`] - application error type for handlers
//! - [`logger`] - tracing subscriber setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult, ErrorBody};
