// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the store crate.
//!
//! Decoding a value of the wrong shape is not an error here: it is reported as
//! [`Decoded::Failed`](crate::domain::Decoded::Failed). The errors below cover
//! what the backing store itself can get wrong.

use thiserror::Error;

/// The main error type for store operations.
///
/// This enum is marked as `#[non_exhaustive]` to allow for future additions
/// without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use hexstore::domain::errors::StoreError;
///
/// fn lookup(key: &str) -> Result<(), StoreError> {
///     if key.is_empty() {
///         return Err(StoreError::InvalidKey {
///             key: key.to_string(),
///         });
///     }
///     Ok(())
/// }
///
/// assert!(lookup("").is_err());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The key is not usable as a store key (for example, it is empty).
    #[error("Invalid store key: '{key}'")]
    InvalidKey {
        /// The rejected key
        key: String,
    },

    /// An error occurred in a store or settings source.
    #[error("Store '{source_name}' error: {message}")]
    SourceError {
        /// The name of the store or source that failed
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse or render persisted store contents.
    #[error("Failed to parse store contents: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The process-wide shared store was already initialized.
    #[error("The shared store has already been initialized")]
    SharedStoreInitialized,
}

impl StoreError {
    /// Creates a `SourceError` for a poisoned lock inside the named store.
    pub fn poisoned(source_name: &str) -> Self {
        StoreError::SourceError {
            source_name: source_name.to_string(),
            message: "lock poisoned by a panicking writer".to_string(),
            source: None,
        }
    }
}

/// A specialized Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_error() {
        let error = StoreError::InvalidKey {
            key: String::new(),
        };
        assert_eq!(error.to_string(), "Invalid store key: ''");
    }

    #[test]
    fn test_source_error() {
        let error = StoreError::SourceError {
            source_name: "yaml-file".to_string(),
            message: "Failed to write".to_string(),
            source: None,
        };
        assert_eq!(error.to_string(), "Store 'yaml-file' error: Failed to write");
    }

    #[test]
    fn test_parse_error() {
        let error = StoreError::ParseError {
            message: "Invalid YAML".to_string(),
            source: None,
        };
        assert_eq!(error.to_string(), "Failed to parse store contents: Invalid YAML");
    }

    #[test]
    fn test_shared_store_initialized() {
        let error = StoreError::SharedStoreInitialized;
        assert!(error.to_string().contains("already been initialized"));
    }

    #[test]
    fn test_poisoned() {
        let error = StoreError::poisoned("memory");
        assert!(matches!(error, StoreError::SourceError { .. }));
        assert!(error.to_string().contains("memory"));
    }
}
