// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value store trait definition.
//!
//! This module defines the `KeyValueStore` trait, the port every backing store
//! implements. It mirrors a flat platform settings store: generic object
//! get/set by string key plus native typed accessors for the common primitives.

use crate::domain::{Result, StoreKey, StoreValue};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use url::Url;

/// A flat, string-keyed store of [`StoreValue`]s.
///
/// Only the generic object methods are required; the native typed accessors
/// are provided on top of them and can be overridden by stores that have a
/// faster path.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a single store can be shared by
/// every setting in the process. All methods take `&self`; stores use interior
/// mutability.
///
/// # Zero Values
///
/// [`integer`](KeyValueStore::integer), [`bool`](KeyValueStore::bool),
/// [`float`](KeyValueStore::float) and [`double`](KeyValueStore::double) keep
/// the platform behaviour of returning the zero value when the key is absent or
/// holds something unconvertible. Use [`contains_key`](KeyValueStore::contains_key)
/// or [`object`](KeyValueStore::object) to tell the cases apart.
///
/// # Examples
///
/// ```rust
/// use hexstore::adapters::MemoryStore;
/// use hexstore::domain::StoreKey;
/// use hexstore::ports::KeyValueStore;
///
/// let store = MemoryStore::new();
/// let key = StoreKey::new("launchCount").unwrap();
///
/// assert_eq!(store.integer(&key).unwrap(), 0);
/// store.set_integer(&key, 5).unwrap();
/// assert_eq!(store.integer(&key).unwrap(), 5);
/// ```
pub trait KeyValueStore: Send + Sync {
    /// Returns the name of this store, used in logs and error messages.
    fn name(&self) -> &str;

    /// Retrieves the value stored under `key`, or `None` if there is none.
    fn object(&self, key: &StoreKey) -> Result<Option<StoreValue>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_object(&self, key: &StoreKey, value: StoreValue) -> Result<()>;

    /// Removes the value stored under `key`. Removing a missing key is not an
    /// error.
    fn remove_object(&self, key: &StoreKey) -> Result<()>;

    /// Returns every key that currently holds a value.
    fn all_keys(&self) -> Result<Vec<StoreKey>>;

    /// Re-reads the store from its backing medium, if it has one.
    fn reload(&self) -> Result<()> {
        Ok(())
    }

    /// Returns `true` if a value is stored under `key`.
    fn contains_key(&self, key: &StoreKey) -> Result<bool> {
        Ok(self.object(key)?.is_some())
    }

    /// Native integer accessor; `0` when absent or unconvertible.
    fn integer(&self, key: &StoreKey) -> Result<i64> {
        Ok(self
            .object(key)?
            .and_then(|v| v.as_integer())
            .unwrap_or_default())
    }

    /// Native boolean accessor; `false` when absent or unconvertible.
    fn bool(&self, key: &StoreKey) -> Result<bool> {
        Ok(self
            .object(key)?
            .and_then(|v| v.as_bool())
            .unwrap_or_default())
    }

    /// Native single-precision accessor; `0.0` when absent or unconvertible.
    fn float(&self, key: &StoreKey) -> Result<f32> {
        Ok(self.double(key)? as f32)
    }

    /// Native double-precision accessor; `0.0` when absent or unconvertible.
    fn double(&self, key: &StoreKey) -> Result<f64> {
        Ok(self
            .object(key)?
            .and_then(|v| v.as_double())
            .unwrap_or_default())
    }

    /// Native string accessor; numbers are rendered as strings.
    fn string(&self, key: &StoreKey) -> Result<Option<String>> {
        Ok(self.object(key)?.and_then(|v| v.as_string()))
    }

    /// Native URL accessor; strings holding a URL or an absolute path convert.
    fn url(&self, key: &StoreKey) -> Result<Option<Url>> {
        Ok(self.object(key)?.and_then(|v| v.as_url()))
    }

    /// Native string-array accessor; `None` unless every element is a string.
    fn string_array(&self, key: &StoreKey) -> Result<Option<Vec<String>>> {
        Ok(self.object(key)?.and_then(|v| v.as_string_array()))
    }

    /// Generic array accessor.
    fn array(&self, key: &StoreKey) -> Result<Option<Vec<StoreValue>>> {
        Ok(self.object(key)?.and_then(|v| match v {
            StoreValue::Array(items) => Some(items),
            _ => None,
        }))
    }

    /// Generic dictionary accessor.
    fn dictionary(&self, key: &StoreKey) -> Result<Option<BTreeMap<String, StoreValue>>> {
        Ok(self.object(key)?.and_then(|v| match v {
            StoreValue::Dictionary(entries) => Some(entries),
            _ => None,
        }))
    }

    /// Binary blob accessor.
    fn data(&self, key: &StoreKey) -> Result<Option<Vec<u8>>> {
        Ok(self.object(key)?.and_then(|v| match v {
            StoreValue::Data(bytes) => Some(bytes),
            _ => None,
        }))
    }

    /// Date accessor.
    fn date(&self, key: &StoreKey) -> Result<Option<DateTime<Utc>>> {
        Ok(self.object(key)?.and_then(|v| v.as_date()))
    }

    /// Native integer writer.
    fn set_integer(&self, key: &StoreKey, value: i64) -> Result<()> {
        self.set_object(key, StoreValue::Integer(value))
    }

    /// Native boolean writer.
    fn set_bool(&self, key: &StoreKey, value: bool) -> Result<()> {
        self.set_object(key, StoreValue::Bool(value))
    }

    /// Native single-precision writer.
    fn set_float(&self, key: &StoreKey, value: f32) -> Result<()> {
        self.set_object(key, StoreValue::Float(f64::from(value)))
    }

    /// Native double-precision writer.
    fn set_double(&self, key: &StoreKey, value: f64) -> Result<()> {
        self.set_object(key, StoreValue::Float(value))
    }

    /// Native string writer.
    fn set_string(&self, key: &StoreKey, value: &str) -> Result<()> {
        self.set_object(key, StoreValue::String(value.to_string()))
    }

    /// Native URL writer.
    fn set_url(&self, key: &StoreKey, value: &Url) -> Result<()> {
        self.set_object(key, StoreValue::Url(value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    // Minimal store that only implements the required methods.
    struct TestStore {
        values: RwLock<HashMap<String, StoreValue>>,
    }

    impl TestStore {
        fn new() -> Self {
            TestStore {
                values: RwLock::new(HashMap::new()),
            }
        }
    }

    impl KeyValueStore for TestStore {
        fn name(&self) -> &str {
            "test-store"
        }

        fn object(&self, key: &StoreKey) -> Result<Option<StoreValue>> {
            Ok(self.values.read().unwrap().get(key.as_str()).cloned())
        }

        fn set_object(&self, key: &StoreKey, value: StoreValue) -> Result<()> {
            self.values
                .write()
                .unwrap()
                .insert(key.as_str().to_string(), value);
            Ok(())
        }

        fn remove_object(&self, key: &StoreKey) -> Result<()> {
            self.values.write().unwrap().remove(key.as_str());
            Ok(())
        }

        fn all_keys(&self) -> Result<Vec<StoreKey>> {
            Ok(self
                .values
                .read()
                .unwrap()
                .keys()
                .map(|k| StoreKey::from(k.as_str()))
                .collect())
        }
    }

    #[test]
    fn test_native_accessors_return_zero_when_absent() {
        let store = TestStore::new();
        let key = StoreKey::from("missing");

        assert_eq!(store.integer(&key).unwrap(), 0);
        assert!(!store.bool(&key).unwrap());
        assert_eq!(store.float(&key).unwrap(), 0.0);
        assert_eq!(store.double(&key).unwrap(), 0.0);
        assert_eq!(store.string(&key).unwrap(), None);
        assert_eq!(store.url(&key).unwrap(), None);
        assert!(!store.contains_key(&key).unwrap());
    }

    #[test]
    fn test_native_accessors_return_zero_when_unconvertible() {
        let store = TestStore::new();
        let key = StoreKey::from("word");
        store.set_string(&key, "hello").unwrap();

        assert_eq!(store.integer(&key).unwrap(), 0);
        assert!(!store.bool(&key).unwrap());
        assert!(store.contains_key(&key).unwrap());
    }

    #[test]
    fn test_native_writers() {
        let store = TestStore::new();
        let key = StoreKey::from("k");

        store.set_bool(&key, true).unwrap();
        assert!(store.bool(&key).unwrap());

        store.set_float(&key, 1.5).unwrap();
        assert_eq!(store.float(&key).unwrap(), 1.5);

        store.set_double(&key, 2.25).unwrap();
        assert_eq!(store.double(&key).unwrap(), 2.25);

        let url = Url::parse("https://example.com/").unwrap();
        store.set_url(&key, &url).unwrap();
        assert_eq!(store.url(&key).unwrap(), Some(url));
        assert_eq!(store.string(&key).unwrap(), None);
    }

    #[test]
    fn test_container_accessors_check_shape() {
        let store = TestStore::new();
        let key = StoreKey::from("list");
        store
            .set_object(&key, StoreValue::Array(vec!["a".into(), "b".into()]))
            .unwrap();

        assert_eq!(store.array(&key).unwrap().map(|a| a.len()), Some(2));
        assert_eq!(
            store.string_array(&key).unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(store.dictionary(&key).unwrap(), None);
        assert_eq!(store.data(&key).unwrap(), None);
        assert_eq!(store.date(&key).unwrap(), None);
    }

    #[test]
    fn test_default_reload_is_noop() {
        let store = TestStore::new();
        assert!(store.reload().is_ok());
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn KeyValueStore>();
    }
}
