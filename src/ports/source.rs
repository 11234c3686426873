// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only settings source trait definition.
//!
//! A `SettingsSource` is one layer of a [`LayeredStore`](crate::service::LayeredStore)'s
//! search list: command-line arguments, environment variables, or anything
//! else that can answer "what value does this key have" without accepting
//! writes.

use crate::domain::{Result, StoreKey, StoreValue};

/// A read-only layer of settings.
///
/// # Priority
///
/// Each source has a priority value (0-255). Sources with higher priority are
/// consulted first. The built-in sources use:
///
/// - **3 (highest)**: Command-line arguments
/// - **2**: Environment variables
///
/// Every source sits above the layered store's persistent store, which in
/// turn sits above the registered defaults.
///
/// # Examples
///
/// ```rust
/// use hexstore::ports::SettingsSource;
/// use hexstore::domain::{Result, StoreKey, StoreValue};
///
/// struct FixedSource;
///
/// impl SettingsSource for FixedSource {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn priority(&self) -> u8 {
///         1
///     }
///
///     fn get(&self, key: &StoreKey) -> Result<Option<StoreValue>> {
///         if key.as_str() == "theme" {
///             Ok(Some(StoreValue::from("dark")))
///         } else {
///             Ok(None)
///         }
///     }
///
///     fn all_keys(&self) -> Result<Vec<StoreKey>> {
///         Ok(vec![StoreKey::from("theme")])
///     }
///
///     fn reload(&mut self) -> Result<()> {
///         Ok(())
///     }
/// }
///
/// let source = FixedSource;
/// assert!(source.get_str("theme").unwrap().is_some());
/// ```
pub trait SettingsSource: Send + Sync {
    /// Returns a short identifier for logs, like "env" or "cli".
    fn name(&self) -> &str;

    /// Returns the priority of this source; higher values win.
    fn priority(&self) -> u8;

    /// Retrieves the value for `key`, or `Ok(None)` if this layer has none.
    fn get(&self, key: &StoreKey) -> Result<Option<StoreValue>>;

    /// Returns all keys this layer provides.
    fn all_keys(&self) -> Result<Vec<StoreKey>>;

    /// Refreshes the layer from its origin. Layers that cannot change (like
    /// command-line arguments) return `Ok(())`.
    fn reload(&mut self) -> Result<()>;

    /// Retrieves a value by string key.
    ///
    /// Equivalent to `get(&StoreKey::from(key))`.
    fn get_str(&self, key: &str) -> Result<Option<StoreValue>> {
        self.get(&StoreKey::from(key))
    }
}
