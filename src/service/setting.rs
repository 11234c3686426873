// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed, defaulted bindings to a single store key.

use crate::codec::Storable;
use crate::domain::{Decoded, Result, StoreKey};
use crate::ports::KeyValueStore;
use crate::service::shared::shared_store;
use std::fmt;
use std::sync::Arc;

type DefaultFn<T> = Box<dyn Fn() -> T + Send + Sync>;
type ChangeFn<T> = Box<dyn Fn(&T) + Send + Sync>;

/// A named, typed setting backed by a [`KeyValueStore`].
///
/// A `Setting` holds no cached value: every [`get`](Setting::get) reads the
/// store, and every [`set`](Setting::set) writes through. When nothing usable
/// is stored the default supplier is called again, so defaults are always
/// fresh.
///
/// # Examples
///
/// ```rust
/// use hexstore::adapters::MemoryStore;
/// use hexstore::service::Setting;
/// use std::sync::Arc;
///
/// # fn main() -> hexstore::domain::Result<()> {
/// let store = Arc::new(MemoryStore::new());
/// let retries = Setting::builder("retryCount", || 3i64)
///     .store(store)
///     .build()?;
///
/// assert_eq!(retries.get(), 3);
///
/// retries.set(0)?;
/// assert_eq!(retries.get(), 0);
/// # Ok(())
/// # }
/// ```
pub struct Setting<T> {
    key: StoreKey,
    default: DefaultFn<T>,
    on_change: Option<ChangeFn<T>>,
    store: Arc<dyn KeyValueStore>,
}

impl<T: Storable> Setting<T> {
    /// Creates a setting bound to the shared store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`](crate::domain::StoreError::InvalidKey)
    /// if `key` is empty.
    pub fn new<F>(key: impl Into<String>, default: F) -> Result<Self>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::builder(key, default).build()
    }

    /// Starts building a setting with an observer or a specific store.
    pub fn builder<F>(key: impl Into<String>, default: F) -> SettingBuilder<T>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        SettingBuilder {
            key: key.into(),
            default: Box::new(default),
            on_change: None,
            store: None,
        }
    }

    /// Returns the stored value, or the default when nothing usable is stored.
    ///
    /// A store failure is logged and also yields the default.
    pub fn get(&self) -> T {
        match self.try_get() {
            Ok(decoded) => decoded.unwrap_or_else(|| self.default_value()),
            Err(e) => {
                tracing::warn!(
                    "Failed to read '{}' from store '{}', using default: {}",
                    self.key,
                    self.store.name(),
                    e
                );
                self.default_value()
            }
        }
    }

    /// Reads the key without falling back to the default.
    pub fn try_get(&self) -> Result<Decoded<T>> {
        T::decode(self.store.as_ref(), &self.key)
    }

    /// Writes `value`, then notifies the observer with it.
    ///
    /// The observer is not called if the write fails.
    pub fn set(&self, value: T) -> Result<()> {
        value.encode(self.store.as_ref(), &self.key)?;
        if let Some(on_change) = &self.on_change {
            on_change(&value);
        }
        Ok(())
    }

    /// Removes the stored value so reads return the default again.
    ///
    /// This does not notify the observer.
    pub fn remove(&self) -> Result<()> {
        self.store.remove_object(&self.key)
    }

    /// Returns `true` if the store holds a value under this setting's key.
    ///
    /// The value may still fail to decode as `T`.
    pub fn is_set(&self) -> Result<bool> {
        self.store.contains_key(&self.key)
    }

    /// Calls the default supplier.
    pub fn default_value(&self) -> T {
        (self.default)()
    }

    /// Returns the key this setting is bound to.
    pub fn key(&self) -> &StoreKey {
        &self.key
    }

    /// Returns the backing store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}

impl<T> fmt::Debug for Setting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setting")
            .field("key", &self.key)
            .field("store", &self.store.name())
            .field("observed", &self.on_change.is_some())
            .finish()
    }
}

/// Builder for a [`Setting`].
///
/// # Examples
///
/// ```rust
/// use hexstore::adapters::MemoryStore;
/// use hexstore::service::Setting;
/// use std::sync::{Arc, Mutex};
///
/// # fn main() -> hexstore::domain::Result<()> {
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// let theme = Setting::builder("theme", || "light".to_string())
///     .store(Arc::new(MemoryStore::new()))
///     .on_change(move |value: &String| sink.lock().unwrap().push(value.clone()))
///     .build()?;
///
/// theme.set("dark".to_string())?;
/// assert_eq!(*seen.lock().unwrap(), vec!["dark".to_string()]);
/// # Ok(())
/// # }
/// ```
pub struct SettingBuilder<T> {
    key: String,
    default: DefaultFn<T>,
    on_change: Option<ChangeFn<T>>,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl<T: Storable> SettingBuilder<T> {
    /// Sets the observer called after every successful write.
    pub fn on_change<F>(mut self, observer: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.on_change = Some(Box::new(observer));
        self
    }

    /// Binds the setting to `store` instead of the shared store.
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Validates the key and builds the setting. Performs no I/O.
    pub fn build(self) -> Result<Setting<T>> {
        let key = StoreKey::new(self.key)?;
        let store = self.store.unwrap_or_else(shared_store);

        Ok(Setting {
            key,
            default: self.default,
            on_change: self.on_change,
            store,
        })
    }
}

impl<T> fmt::Debug for SettingBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingBuilder")
            .field("key", &self.key)
            .field("store", &self.store.as_ref().map(|s| s.name().to_string()))
            .finish()
    }
}
