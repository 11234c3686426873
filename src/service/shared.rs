// SPDX-License-Identifier: MIT OR Apache-2.0

//! The process-wide shared store.
//!
//! Settings built without an explicit store bind to this handle. It is created
//! on first use; an application that wants a persistent or layered store
//! installs it before building any setting.

use crate::adapters::MemoryStore;
use crate::domain::{Result, StoreError};
use crate::ports::KeyValueStore;
use once_cell::sync::OnceCell;
use std::sync::Arc;

static SHARED_STORE: OnceCell<Arc<dyn KeyValueStore>> = OnceCell::new();

/// Returns the process-wide store, creating an empty [`MemoryStore`] if none
/// was installed.
///
/// # Examples
///
/// ```rust
/// use hexstore::service::shared_store;
///
/// let a = shared_store();
/// let b = shared_store();
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// ```
pub fn shared_store() -> Arc<dyn KeyValueStore> {
    Arc::clone(SHARED_STORE.get_or_init(|| {
        tracing::debug!("Initializing shared store with an in-memory store");
        Arc::new(MemoryStore::new())
    }))
}

/// Installs `store` as the process-wide store.
///
/// # Errors
///
/// Returns [`StoreError::SharedStoreInitialized`] if a store was already
/// installed or [`shared_store`] was already called.
///
/// # Examples
///
/// ```rust
/// use hexstore::adapters::MemoryStore;
/// use hexstore::ports::KeyValueStore;
/// use hexstore::service::{install_shared_store, shared_store};
/// use std::sync::Arc;
///
/// let store = Arc::new(MemoryStore::new());
/// install_shared_store(store.clone()).unwrap();
///
/// assert!(install_shared_store(Arc::new(MemoryStore::new())).is_err());
/// assert_eq!(shared_store().name(), "memory");
/// ```
pub fn install_shared_store(store: Arc<dyn KeyValueStore>) -> Result<()> {
    let name = store.name().to_string();
    SHARED_STORE
        .set(store)
        .map_err(|_| StoreError::SharedStoreInitialized)?;
    tracing::debug!("Installed '{}' as the shared store", name);
    Ok(())
}
