// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities and mock implementations for testing.
//!
//! This module provides a mock settings source and a store whose failures can
//! be switched on, for exercising the error paths of settings and layered
//! stores.

use hexstore::adapters::MemoryStore;
use hexstore::domain::{Result, StoreError, StoreKey, StoreValue};
use hexstore::ports::{KeyValueStore, SettingsSource};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// A mock settings source with predefined values and a custom priority.
#[derive(Debug, Clone)]
pub struct MockSettingsSource {
    name: String,
    priority: u8,
    values: BTreeMap<String, StoreValue>,
    should_fail_reload: bool,
}

impl MockSettingsSource {
    /// Creates a new mock source with the given name and priority.
    pub fn new(name: impl Into<String>, priority: u8) -> Self {
        Self {
            name: name.into(),
            priority,
            values: BTreeMap::new(),
            should_fail_reload: false,
        }
    }

    /// Adds a value to the mock source.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<StoreValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Sets whether reload should fail.
    pub fn with_failing_reload(mut self, should_fail: bool) -> Self {
        self.should_fail_reload = should_fail;
        self
    }
}

impl SettingsSource for MockSettingsSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn get(&self, key: &StoreKey) -> Result<Option<StoreValue>> {
        Ok(self.values.get(key.as_str()).cloned())
    }

    fn all_keys(&self) -> Result<Vec<StoreKey>> {
        Ok(self.values.keys().map(|k| StoreKey::from(k.as_str())).collect())
    }

    fn reload(&mut self) -> Result<()> {
        if self.should_fail_reload {
            Err(StoreError::SourceError {
                source_name: self.name.clone(),
                message: "Mock reload failure".to_string(),
                source: None,
            })
        } else {
            Ok(())
        }
    }
}

/// A memory-backed store whose reads and writes can be made to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    /// Creates a store that works until told otherwise.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every read fail (or succeed again).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every write and removal fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn error(&self, operation: &str) -> StoreError {
        StoreError::SourceError {
            source_name: self.name().to_string(),
            message: format!("Mock {} failure", operation),
            source: None,
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn name(&self) -> &str {
        "flaky"
    }

    fn object(&self, key: &StoreKey) -> Result<Option<StoreValue>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(self.error("read"));
        }
        self.inner.object(key)
    }

    fn set_object(&self, key: &StoreKey, value: StoreValue) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(self.error("write"));
        }
        self.inner.set_object(key, value)
    }

    fn remove_object(&self, key: &StoreKey) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(self.error("write"));
        }
        self.inner.remove_object(key)
    }

    fn all_keys(&self) -> Result<Vec<StoreKey>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(self.error("read"));
        }
        self.inner.all_keys()
    }
}

/// Creates multiple mock sources with different priorities for precedence testing.
pub fn create_precedence_sources() -> (MockSettingsSource, MockSettingsSource, MockSettingsSource) {
    let low = MockSettingsSource::new("low_priority", 1)
        .with_value("key1", "from_low")
        .with_value("key2", "low_value");

    let medium = MockSettingsSource::new("medium_priority", 2)
        .with_value("key1", "from_medium")
        .with_value("key3", "medium_value");

    let high = MockSettingsSource::new("high_priority", 3)
        .with_value("key1", "from_high")
        .with_value("key4", "high_value");

    (low, medium, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexstore::domain::Decoded;
    use hexstore::service::{LayeredStore, Setting};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_mock_source_basic() {
        let source = MockSettingsSource::new("test", 1).with_value("key", "value");

        assert_eq!(source.name(), "test");
        assert_eq!(source.priority(), 1);
        assert_eq!(
            source.get_str("key").unwrap(),
            Some(StoreValue::from("value"))
        );
    }

    #[test]
    fn test_mock_source_reload_failure() {
        let mut source = MockSettingsSource::new("test", 1).with_failing_reload(true);
        assert!(source.reload().is_err());
    }

    #[test]
    fn test_precedence_sources() {
        let (low, medium, high) = create_precedence_sources();
        let store = LayeredStore::builder(Arc::new(MemoryStore::new()))
            .with_source(Box::new(low))
            .with_source(Box::new(high))
            .with_source(Box::new(medium))
            .build()
            .unwrap();

        let key1 = StoreKey::from("key1");
        assert_eq!(store.string(&key1).unwrap().as_deref(), Some("from_high"));
        assert_eq!(
            store.string(&StoreKey::from("key2")).unwrap().as_deref(),
            Some("low_value")
        );
        assert_eq!(store.all_keys().unwrap().len(), 4);
    }

    #[test]
    fn test_layered_reload_survives_failing_source() {
        let store = LayeredStore::builder(Arc::new(MemoryStore::new()))
            .with_source(Box::new(
                MockSettingsSource::new("broken", 1)
                    .with_value("key", "value")
                    .with_failing_reload(true),
            ))
            .build()
            .unwrap();

        assert!(store.reload().is_ok());
        assert_eq!(
            store.string(&StoreKey::from("key")).unwrap().as_deref(),
            Some("value")
        );
    }

    #[test]
    fn test_read_failure_falls_back_to_default() {
        let store = Arc::new(FlakyStore::new());
        let setting = Setting::builder("retryCount", || 3i64)
            .store(store.clone())
            .build()
            .unwrap();

        setting.set(8).unwrap();
        store.fail_reads(true);

        assert_eq!(setting.get(), 3);
        assert!(setting.try_get().is_err());
        assert!(setting.is_set().is_err());

        store.fail_reads(false);
        assert_eq!(setting.try_get().unwrap(), Decoded::Present(8));
    }

    #[test]
    fn test_write_failure_skips_observer() {
        let store = Arc::new(FlakyStore::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let setting = Setting::builder("theme", || "light".to_string())
            .store(store.clone())
            .on_change(move |v: &String| sink.lock().unwrap().push(v.clone()))
            .build()
            .unwrap();

        store.fail_writes(true);
        let result = setting.set("dark".to_string());
        assert!(matches!(result, Err(StoreError::SourceError { .. })));
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(setting.get(), "light");

        store.fail_writes(false);
        setting.set("dark".to_string()).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["dark".to_string()]);
    }

    #[test]
    fn test_remove_failure_is_reported() {
        let store = Arc::new(FlakyStore::new());
        let setting = Setting::builder("count", || 0i64)
            .store(store.clone())
            .build()
            .unwrap();

        setting.set(2).unwrap();
        store.fail_writes(true);
        assert!(setting.remove().is_err());

        store.fail_writes(false);
        assert_eq!(setting.get(), 2);
    }
}
