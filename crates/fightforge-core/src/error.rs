//! Error types for FightForge

use thiserror::Error;

/// Main error type for FightForge operations.
///
/// Numeric input problems are never errors: they are coerced to zero by the
/// [`input`](crate::input) helpers. Only the upstream price lookup and run
/// control can fail.
#[derive(Debug, Error)]
pub enum FightForgeError {
    /// The upstream price feed could not be queried or decoded
    #[error("Price feed error: {0}")]
    PriceFeed(String),

    /// Search was cancelled before completion
    #[error("Search was cancelled")]
    Cancelled,

    /// Invalid operation for current search state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for FightForge operations
pub type Result<T> = std::result::Result<T, FightForgeError>;
