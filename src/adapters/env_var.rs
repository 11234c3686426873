// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable settings source adapter.
//!
//! This module provides a read-only layer that answers lookups from the
//! process environment.

use crate::domain::{Result, StoreError, StoreKey, StoreValue};
use crate::ports::SettingsSource;
use std::collections::HashMap;
use std::env;
use std::sync::RwLock;

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Settings source for environment variables.
///
/// Values surface as strings; the typed codecs convert them on read, so
/// `APP_retryCount=5` reads as the integer 5 through a `Setting<i64>`.
///
/// By default the variable name (minus the optional prefix) is used as the key
/// unchanged. Lowercasing and underscore-to-dot replacement can be enabled for
/// dotted key schemes.
///
/// # Priority
///
/// Environment variables have a priority of 2: they override the persistent
/// store but are overridden by command-line arguments (priority 3).
///
/// # Examples
///
/// ```rust
/// use hexstore::adapters::EnvVarSource;
///
/// // Read all environment variables
/// let source = EnvVarSource::new();
///
/// // Read only variables with a specific prefix
/// let source = EnvVarSource::with_prefix("MYAPP_");
/// ```
#[derive(Debug)]
pub struct EnvVarSource {
    /// Optional prefix to filter environment variables
    prefix: Option<String>,
    /// Whether to convert keys to lowercase
    lowercase_keys: bool,
    /// Whether to replace underscores with dots
    replace_underscores: bool,
    /// Cached environment variables, loaded lazily
    cache: RwLock<Option<HashMap<String, String>>>,
}

impl EnvVarSource {
    /// Creates a source over every environment variable.
    pub fn new() -> Self {
        Self {
            prefix: None,
            lowercase_keys: false,
            replace_underscores: false,
            cache: RwLock::new(None),
        }
    }

    /// Creates a source over variables starting with `prefix`.
    ///
    /// The prefix is stripped from the key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hexstore::adapters::EnvVarSource;
    ///
    /// let source = EnvVarSource::with_prefix("MYAPP_");
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
            ..Self::new()
        }
    }

    /// Sets whether to convert keys to lowercase.
    pub fn lowercase_keys(mut self, enabled: bool) -> Self {
        self.lowercase_keys = enabled;
        self
    }

    /// Sets whether to replace underscores with dots in keys.
    pub fn replace_underscores(mut self, enabled: bool) -> Self {
        self.replace_underscores = enabled;
        self
    }

    /// Creates a source with pre-populated values instead of the process
    /// environment.
    ///
    /// **Note**: This is primarily intended for testing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hexstore::adapters::EnvVarSource;
    /// use hexstore::ports::SettingsSource;
    /// use std::collections::HashMap;
    ///
    /// let mut values = HashMap::new();
    /// values.insert("retryCount".to_string(), "5".to_string());
    ///
    /// let source = EnvVarSource::with_values(values);
    /// assert!(source.get_str("retryCount").unwrap().is_some());
    /// ```
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            cache: RwLock::new(Some(values)),
            ..Self::new()
        }
    }

    /// Loads environment variables into a new map.
    fn load(&self) -> HashMap<String, String> {
        let mut cache = HashMap::new();

        for (key, value) in env::vars() {
            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    key.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                continue;
            }

            let key = match &self.prefix {
                Some(prefix) => match key.strip_prefix(prefix.as_str()) {
                    Some(stripped) if !stripped.is_empty() => stripped.to_string(),
                    _ => continue,
                },
                None => key,
            };

            let mut transformed_key = key;
            if self.lowercase_keys {
                transformed_key = transformed_key.to_lowercase();
            }
            if self.replace_underscores {
                transformed_key = transformed_key.replace('_', ".");
            }

            cache.insert(transformed_key, value);
        }

        tracing::debug!(
            "Loaded {} environment variables (prefix={:?}, lowercase={}, replace_underscores={})",
            cache.len(),
            self.prefix,
            self.lowercase_keys,
            self.replace_underscores
        );

        cache
    }

    /// Runs `f` against the cache, loading it first if necessary.
    fn with_cache<R>(&self, f: impl FnOnce(&HashMap<String, String>) -> R) -> Result<R> {
        {
            let guard = self.cache.read().map_err(|_| StoreError::poisoned("env"))?;
            if let Some(cache) = guard.as_ref() {
                return Ok(f(cache));
            }
        }

        let mut guard = self.cache.write().map_err(|_| StoreError::poisoned("env"))?;
        let cache = guard.get_or_insert_with(|| self.load());
        Ok(f(cache))
    }
}

impl Default for EnvVarSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsSource for EnvVarSource {
    fn name(&self) -> &str {
        "env"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn get(&self, key: &StoreKey) -> Result<Option<StoreValue>> {
        self.with_cache(|cache| cache.get(key.as_str()).map(|v| StoreValue::from(v.as_str())))
    }

    fn all_keys(&self) -> Result<Vec<StoreKey>> {
        self.with_cache(|cache| cache.keys().map(|k| StoreKey::from(k.as_str())).collect())
    }

    fn reload(&mut self) -> Result<()> {
        let mut guard = self.cache.write().map_err(|_| StoreError::poisoned("env"))?;
        *guard = None;
        Ok(())
    }
}
