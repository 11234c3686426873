// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store key newtype for type-safe key handling.
//!
//! This module provides the `StoreKey` type, a newtype wrapper around `String`
//! that names one slot in a flat key-value store.

use crate::domain::errors::{Result, StoreError};
use std::borrow::Borrow;
use std::fmt;

/// A type-safe wrapper for store keys.
///
/// Keys are flat: there is no namespacing, so two settings declared with the
/// same key against the same store share one slot.
///
/// # Examples
///
/// ```
/// use hexstore::domain::store_key::StoreKey;
///
/// let key = StoreKey::new("retryCount").unwrap();
/// assert_eq!(key.as_str(), "retryCount");
///
/// assert!(StoreKey::new("").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreKey(String);

impl StoreKey {
    /// Creates a new `StoreKey`, rejecting the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] if `key` is empty.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(StoreError::InvalidKey { key });
        }
        Ok(StoreKey(key))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `StoreKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

// Unchecked conversions for keys that come out of an already populated
// source (an environment variable name, a file entry).
impl From<String> for StoreKey {
    fn from(s: String) -> Self {
        StoreKey(s)
    }
}

impl From<&str> for StoreKey {
    fn from(s: &str) -> Self {
        StoreKey(s.to_string())
    }
}

impl From<StoreKey> for String {
    fn from(key: StoreKey) -> Self {
        key.0
    }
}

impl AsRef<str> for StoreKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StoreKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
