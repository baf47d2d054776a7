//! Errors returned by the registry.

use chrono::{DateTime, Utc};

/// Failure of a registry operation.
///
/// A failed operation never leaves a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("short code '{code}' is already in use")]
    CodeConflict { code: String },

    #[error("short code '{code}' not found")]
    NotFound { code: String },

    #[error("short code '{code}' expired at {expired_at}")]
    Expired {
        code: String,
        expired_at: DateTime<Utc>,
    },

    #[error("internal registry fault: {0}")]
    Internal(String),
}
