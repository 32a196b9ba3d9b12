//! Error types for geometry and framing operations.

use thiserror::Error;

/// Result type for geoframe operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors raised at construction or computation boundaries.
///
/// Every variant is produced synchronously before any value is built, so a
/// caller never observes a partially valid position or distance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    /// A required argument was absent, non-finite, or outside its domain.
    #[error("invalid argument `{name}`: {detail}")]
    InvalidArgument {
        /// Name of the offending argument.
        name: &'static str,
        /// What was wrong with it.
        detail: String,
    },
    /// A unit-cancelling division had a zero divisor.
    #[error("division by zero in {operation}")]
    DivisionByZero {
        /// The operation that was attempted.
        operation: &'static str,
    },
}

impl GeoError {
    pub(crate) fn invalid(name: &'static str, detail: impl Into<String>) -> Self {
        GeoError::InvalidArgument {
            name,
            detail: detail.into(),
        }
    }
}
