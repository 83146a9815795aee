//! Error types for the placemarks store.
//!
//! This module defines the centralized error type [`PlacemarksError`] and a type alias
//! [`Result`] used throughout the crate. Most variants wrap underlying errors from
//! external crates using `#[from]` for automatic conversion.
//!
//! Note that several situations are deliberately *not* errors: composing a favorite
//! for a disconnected host yields `None`, a malformed record in a persisted document
//! is skipped on load, and a footprint missing from the ledger is an empty lookup.

use thiserror::Error;

/// The main error type for placemarks operations.
///
/// # Examples
///
/// ```
/// use placemarks::PlacemarksError;
///
/// fn validate_key(key: &str) -> Result<(), PlacemarksError> {
///     if key.is_empty() {
///         return Err(PlacemarksError::Config("document key must not be empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_key("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum PlacemarksError {
    /// Reading from or writing to the config store failed.
    ///
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed at the document level.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The host could not produce a mount-stack snapshot.
    ///
    /// Raised by location resolution when some layer of the host chain is
    /// disconnected. Callers that compose favorites or record visits turn this
    /// into an empty result rather than propagating it.
    #[error("Location is unreachable: {0}")]
    Unreachable(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for placemarks operations.
pub type Result<T> = std::result::Result<T, PlacemarksError>;
