// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory key-value store adapter.
//!
//! This module provides the store used as the process-wide default when no
//! other store has been installed. It keeps nothing across process restarts.

use crate::domain::{Result, StoreError, StoreKey, StoreValue};
use crate::ports::KeyValueStore;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// A thread-safe, non-persistent key-value store.
///
/// # Examples
///
/// ```rust
/// use hexstore::adapters::MemoryStore;
/// use hexstore::domain::{StoreKey, StoreValue};
/// use hexstore::ports::KeyValueStore;
///
/// let store = MemoryStore::new();
/// let key = StoreKey::new("greeting").unwrap();
///
/// store.set_object(&key, StoreValue::from("hello")).unwrap();
/// assert_eq!(store.string(&key).unwrap().as_deref(), Some("hello"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Stored values by key
    values: RwLock<BTreeMap<String, StoreValue>>,
}

impl MemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
        }
    }

    /// Creates a store with pre-populated values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hexstore::adapters::MemoryStore;
    /// use hexstore::domain::StoreValue;
    /// use hexstore::ports::KeyValueStore;
    /// use std::collections::BTreeMap;
    ///
    /// let mut values = BTreeMap::new();
    /// values.insert("retryCount".to_string(), StoreValue::Integer(5));
    ///
    /// let store = MemoryStore::with_values(values);
    /// assert_eq!(store.all_keys().unwrap().len(), 1);
    /// ```
    pub fn with_values(values: BTreeMap<String, StoreValue>) -> Self {
        Self {
            values: RwLock::new(values),
        }
    }

    /// Returns a copy of every stored value.
    pub fn snapshot(&self) -> Result<BTreeMap<String, StoreValue>> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::poisoned(self.name()))?;
        Ok(values.clone())
    }

    /// Removes every stored value.
    pub fn clear(&self) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::poisoned(self.name()))?;
        values.clear();
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn object(&self, key: &StoreKey) -> Result<Option<StoreValue>> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::poisoned(self.name()))?;
        Ok(values.get(key.as_str()).cloned())
    }

    fn set_object(&self, key: &StoreKey, value: StoreValue) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::poisoned(self.name()))?;
        values.insert(key.as_str().to_string(), value);
        Ok(())
    }

    fn remove_object(&self, key: &StoreKey) -> Result<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::poisoned(self.name()))?;
        values.remove(key.as_str());
        Ok(())
    }

    fn all_keys(&self) -> Result<Vec<StoreKey>> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::poisoned(self.name()))?;
        Ok(values.keys().map(|k| StoreKey::from(k.as_str())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_memory_store_name() {
        let store = MemoryStore::new();
        assert_eq!(store.name(), "memory");
    }

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        let key = StoreKey::from("k");

        assert_eq!(store.object(&key).unwrap(), None);

        store.set_object(&key, StoreValue::Integer(1)).unwrap();
        assert_eq!(store.object(&key).unwrap(), Some(StoreValue::Integer(1)));

        store.set_object(&key, StoreValue::from("two")).unwrap();
        assert_eq!(store.object(&key).unwrap(), Some(StoreValue::from("two")));

        store.remove_object(&key).unwrap();
        assert_eq!(store.object(&key).unwrap(), None);
    }

    #[test]
    fn test_memory_store_remove_missing_key() {
        let store = MemoryStore::new();
        assert!(store.remove_object(&StoreKey::from("missing")).is_ok());
    }

    #[test]
    fn test_memory_store_all_keys_sorted() {
        let store = MemoryStore::new();
        store.set_object(&StoreKey::from("b"), true.into()).unwrap();
        store.set_object(&StoreKey::from("a"), false.into()).unwrap();

        let keys = store.all_keys().unwrap();
        assert_eq!(keys, vec![StoreKey::from("a"), StoreKey::from("b")]);
    }

    #[test]
    fn test_memory_store_snapshot_and_clear() {
        let store = MemoryStore::new();
        store.set_object(&StoreKey::from("a"), 1i64.into()).unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);

        store.clear().unwrap();
        assert!(store.all_keys().unwrap().is_empty());
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_memory_store_shared_across_threads() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let key = StoreKey::from(format!("worker.{}", i));
                    store.set_integer(&key, i).unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.all_keys().unwrap().len(), 4);
        assert_eq!(store.integer(&StoreKey::from("worker.3")).unwrap(), 3);
    }
}
