// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered store implementation.
//!
//! This module provides a [`KeyValueStore`] that searches several layers in a
//! fixed order, the way a platform defaults system searches its domains:
//!
//! 1. override sources, highest priority first (command line, environment)
//! 2. the persistent store
//! 3. registered defaults
//!
//! Writes and removals always go to the persistent store.

use crate::adapters::MemoryStore;
use crate::domain::{Result, StoreError, StoreKey, StoreValue};
use crate::ports::{KeyValueStore, SettingsSource};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, RwLock};

/// A store that layers read-only sources over a persistent store and a set of
/// registered defaults.
///
/// # Examples
///
/// ```rust
/// use hexstore::adapters::MemoryStore;
/// use hexstore::domain::{StoreKey, StoreValue};
/// use hexstore::ports::KeyValueStore;
/// use hexstore::service::LayeredStore;
/// use std::collections::BTreeMap;
/// use std::sync::Arc;
///
/// # fn main() -> hexstore::domain::Result<()> {
/// let mut defaults = BTreeMap::new();
/// defaults.insert("retryCount".to_string(), StoreValue::Integer(3));
///
/// let store = LayeredStore::builder(Arc::new(MemoryStore::new()))
///     .with_cli_args(vec!["-theme", "dark"])
///     .with_registered_defaults(defaults)
///     .build()?;
///
/// assert_eq!(store.integer(&StoreKey::from("retryCount"))?, 3);
/// assert_eq!(store.string(&StoreKey::from("theme"))?.as_deref(), Some("dark"));
/// # Ok(())
/// # }
/// ```
pub struct LayeredStore {
    /// Override sources, maintained in priority order (highest first)
    sources: RwLock<Vec<Box<dyn SettingsSource>>>,
    /// The store that receives writes
    persistent: Arc<dyn KeyValueStore>,
    /// Values consulted when no other layer has the key
    registered: RwLock<BTreeMap<String, StoreValue>>,
}

impl LayeredStore {
    /// Creates a layered store with no override sources.
    pub fn new(persistent: Arc<dyn KeyValueStore>) -> Self {
        Self {
            sources: RwLock::new(Vec::new()),
            persistent,
            registered: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates a layered store builder.
    pub fn builder(persistent: Arc<dyn KeyValueStore>) -> LayeredStoreBuilder {
        LayeredStoreBuilder::new(persistent)
    }

    /// Creates a layered store with the standard layers for an application.
    ///
    /// This includes command-line arguments, environment variables prefixed
    /// with the upper-cased application name (`my-app` reads `MY_APP_*`),
    /// and a YAML file at the OS-appropriate location as the persistent
    /// store. Without the `yaml` feature, or if the file cannot be opened,
    /// the persistent store is in memory.
    ///
    /// # Arguments
    ///
    /// * `app_name` - The application name
    /// * `qualifier` - The organization/qualifier (e.g., "com.example")
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use hexstore::service::LayeredStore;
    ///
    /// # fn main() -> hexstore::domain::Result<()> {
    /// let store = LayeredStore::with_defaults("myapp", "com.example")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_defaults(app_name: &str, qualifier: &str) -> Result<Self> {
        let persistent = default_persistent_store(app_name, qualifier);

        #[allow(unused_mut)]
        let mut builder = Self::builder(persistent);

        #[cfg(feature = "env")]
        {
            builder = builder.with_env_prefix(env_prefix(app_name));
        }

        #[cfg(feature = "cli")]
        {
            use crate::adapters::CommandLineSource;
            builder = builder.with_source(Box::new(CommandLineSource::from_env_args()));
        }

        builder.build()
    }

    /// Adds an override source. Sources are kept sorted by priority.
    pub fn add_source(&self, source: Box<dyn SettingsSource>) -> Result<()> {
        let mut sources = self
            .sources
            .write()
            .map_err(|_| StoreError::poisoned(self.name()))?;
        tracing::debug!(
            "Adding source '{}' with priority {}",
            source.name(),
            source.priority()
        );
        sources.push(source);
        sources.sort_by_key(|s| std::cmp::Reverse(s.priority()));
        Ok(())
    }

    /// Registers fallback values consulted when no other layer has the key.
    ///
    /// Registered values are never persisted. Registering a key again
    /// replaces the earlier value.
    pub fn register_defaults(&self, defaults: BTreeMap<String, StoreValue>) -> Result<()> {
        let mut registered = self
            .registered
            .write()
            .map_err(|_| StoreError::poisoned(self.name()))?;
        tracing::debug!("Registering {} default values", defaults.len());
        registered.extend(defaults);
        Ok(())
    }

    /// Returns the store that receives writes.
    pub fn persistent(&self) -> &Arc<dyn KeyValueStore> {
        &self.persistent
    }

    /// Returns the names of the override sources, highest priority first.
    pub fn source_names(&self) -> Result<Vec<String>> {
        let sources = self
            .sources
            .read()
            .map_err(|_| StoreError::poisoned(self.name()))?;
        Ok(sources.iter().map(|s| s.name().to_string()).collect())
    }

    /// Queries the override sources in priority order.
    fn query_sources(&self, key: &StoreKey) -> Result<Option<(String, StoreValue)>> {
        let sources = self
            .sources
            .read()
            .map_err(|_| StoreError::poisoned(self.name()))?;

        for source in sources.iter() {
            match source.get(key) {
                Ok(Some(value)) => return Ok(Some((source.name().to_string(), value))),
                Ok(None) => continue,
                Err(e) => {
                    tracing::debug!(
                        "Error querying source '{}' for key '{}': {}",
                        source.name(),
                        key,
                        e
                    );
                    continue;
                }
            }
        }
        Ok(None)
    }
}

impl KeyValueStore for LayeredStore {
    fn name(&self) -> &str {
        "layered"
    }

    fn object(&self, key: &StoreKey) -> Result<Option<StoreValue>> {
        if let Some((_, value)) = self.query_sources(key)? {
            return Ok(Some(value));
        }

        if let Some(value) = self.persistent.object(key)? {
            return Ok(Some(value));
        }

        let registered = self
            .registered
            .read()
            .map_err(|_| StoreError::poisoned(self.name()))?;
        Ok(registered.get(key.as_str()).cloned())
    }

    fn set_object(&self, key: &StoreKey, value: StoreValue) -> Result<()> {
        if let Some((source, _)) = self.query_sources(key)? {
            tracing::debug!(
                "Write to '{}' is shadowed by source '{}' until that source changes",
                key,
                source
            );
        }
        self.persistent.set_object(key, value)
    }

    fn remove_object(&self, key: &StoreKey) -> Result<()> {
        self.persistent.remove_object(key)
    }

    fn all_keys(&self) -> Result<Vec<StoreKey>> {
        let mut keys = BTreeSet::new();

        {
            let sources = self
                .sources
                .read()
                .map_err(|_| StoreError::poisoned(self.name()))?;
            for source in sources.iter() {
                match source.all_keys() {
                    Ok(source_keys) => keys.extend(source_keys),
                    Err(e) => {
                        tracing::debug!("Error listing keys of source '{}': {}", source.name(), e);
                    }
                }
            }
        }

        keys.extend(self.persistent.all_keys()?);

        let registered = self
            .registered
            .read()
            .map_err(|_| StoreError::poisoned(self.name()))?;
        keys.extend(registered.keys().map(|k| StoreKey::from(k.as_str())));

        Ok(keys.into_iter().collect())
    }

    fn reload(&self) -> Result<()> {
        {
            let mut sources = self
                .sources
                .write()
                .map_err(|_| StoreError::poisoned(self.name()))?;
            for source in sources.iter_mut() {
                if let Err(e) = source.reload() {
                    tracing::warn!("Failed to reload source '{}': {}", source.name(), e);
                }
            }
        }

        if let Err(e) = self.persistent.reload() {
            tracing::warn!(
                "Failed to reload persistent store '{}': {}",
                self.persistent.name(),
                e
            );
        }

        Ok(())
    }
}

impl fmt::Debug for LayeredStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredStore")
            .field("sources", &self.source_names().unwrap_or_default())
            .field("persistent", &self.persistent.name())
            .finish()
    }
}

/// Builder for constructing a [`LayeredStore`].
///
/// # Examples
///
/// ```rust
/// use hexstore::adapters::MemoryStore;
/// use hexstore::service::LayeredStoreBuilder;
/// use std::sync::Arc;
///
/// # fn main() -> hexstore::domain::Result<()> {
/// let store = LayeredStoreBuilder::new(Arc::new(MemoryStore::new()))
///     .with_env_prefix("MYAPP_")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct LayeredStoreBuilder {
    persistent: Arc<dyn KeyValueStore>,
    sources: Vec<Box<dyn SettingsSource>>,
    defaults: BTreeMap<String, StoreValue>,
}

impl LayeredStoreBuilder {
    /// Creates a builder around the store that will receive writes.
    pub fn new(persistent: Arc<dyn KeyValueStore>) -> Self {
        Self {
            persistent,
            sources: Vec::new(),
            defaults: BTreeMap::new(),
        }
    }

    /// Adds an override source.
    pub fn with_source(mut self, source: Box<dyn SettingsSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Adds every environment variable as an override source.
    #[cfg(feature = "env")]
    pub fn with_env_vars(self) -> Self {
        use crate::adapters::EnvVarSource;
        self.with_source(Box::new(EnvVarSource::new()))
    }

    /// Adds the environment variables starting with `prefix` as an override
    /// source, with the prefix stripped from the key.
    #[cfg(feature = "env")]
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        use crate::adapters::EnvVarSource;
        self.with_source(Box::new(EnvVarSource::with_prefix(prefix)))
    }

    /// Adds command-line arguments as an override source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hexstore::adapters::MemoryStore;
    /// use hexstore::service::LayeredStoreBuilder;
    /// use std::sync::Arc;
    ///
    /// # fn main() -> hexstore::domain::Result<()> {
    /// let store = LayeredStoreBuilder::new(Arc::new(MemoryStore::new()))
    ///     .with_cli_args(vec!["--retryCount", "5"])
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "cli")]
    pub fn with_cli_args<S: AsRef<str>>(self, args: Vec<S>) -> Self {
        use crate::adapters::CommandLineSource;
        self.with_source(Box::new(CommandLineSource::from_args(args)))
    }

    /// Adds fallback values for keys no other layer has.
    pub fn with_registered_defaults(mut self, defaults: BTreeMap<String, StoreValue>) -> Self {
        self.defaults.extend(defaults);
        self
    }

    /// Builds the layered store.
    pub fn build(self) -> Result<LayeredStore> {
        let store = LayeredStore::new(self.persistent);

        for source in self.sources {
            store.add_source(source)?;
        }
        store.register_defaults(self.defaults)?;

        Ok(store)
    }
}

impl fmt::Debug for LayeredStoreBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredStoreBuilder")
            .field("persistent", &self.persistent.name())
            .field("sources", &self.sources.len())
            .field("defaults", &self.defaults.len())
            .finish()
    }
}

#[cfg(feature = "env")]
fn env_prefix(app_name: &str) -> String {
    format!("{}_", app_name.to_uppercase().replace(['-', ' ', '.'], "_"))
}

#[cfg(feature = "yaml")]
fn default_persistent_store(app_name: &str, qualifier: &str) -> Arc<dyn KeyValueStore> {
    use crate::adapters::YamlFileStore;
    match YamlFileStore::from_default_location(app_name, qualifier) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!("Falling back to an in-memory store: {}", e);
            Arc::new(MemoryStore::new())
        }
    }
}

#[cfg(not(feature = "yaml"))]
fn default_persistent_store(_app_name: &str, _qualifier: &str) -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}
