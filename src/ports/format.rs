// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store file format trait definition.
//!
//! This module defines the `StoreFormat` trait, which converts the contents of
//! a file-backed store to and from text.

use crate::domain::{Result, StoreValue};
use std::collections::BTreeMap;

/// A text encoding for the full contents of a store.
///
/// Keys are flat; a format must not split or nest them.
///
/// # Examples
///
/// ```rust
/// use hexstore::ports::StoreFormat;
/// use hexstore::domain::{Result, StoreValue};
/// use std::collections::BTreeMap;
///
/// struct LinesFormat;
///
/// impl StoreFormat for LinesFormat {
///     fn parse(&self, content: &str) -> Result<BTreeMap<String, StoreValue>> {
///         Ok(content
///             .lines()
///             .filter_map(|line| line.split_once('='))
///             .map(|(k, v)| (k.to_string(), StoreValue::from(v)))
///             .collect())
///     }
///
///     fn render(&self, values: &BTreeMap<String, StoreValue>) -> Result<String> {
///         Ok(values.iter().map(|(k, v)| format!("{}={}\n", k, v)).collect())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["lines"]
///     }
/// }
///
/// let format = LinesFormat;
/// let values = format.parse("a=1\nb=2").unwrap();
/// assert_eq!(values.len(), 2);
/// ```
pub trait StoreFormat {
    /// Parses file content into the store's key/value map.
    fn parse(&self, content: &str) -> Result<BTreeMap<String, StoreValue>>;

    /// Renders the store's key/value map as file content.
    fn render(&self, values: &BTreeMap<String, StoreValue>) -> Result<String>;

    /// Returns the file extensions this format handles (without the dot).
    fn supported_extensions(&self) -> &[&str];

    /// Returns `true` if `extension` (without the dot, any case) is handled.
    fn supports_extension(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
