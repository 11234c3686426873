// SPDX-License-Identifier: MIT OR Apache-2.0

//! A typed key-value settings crate built on hexagonal architecture.
//!
//! This crate lets an application declare its settings as typed values bound
//! to string keys in a flat key-value store. Each value type knows how to read
//! itself from, and write itself to, the store; a setting adds a default, an
//! optional change observer and the store it talks to.
//!
//! # Architecture
//!
//! - **Domain Layer**: Core types (`StoreKey`, `StoreValue`, `Decoded`, errors)
//! - **Ports**: Trait definitions (`KeyValueStore`, `SettingsSource`, `StoreFormat`)
//! - **Codec**: The `Storable` contract and its built-in conformances
//! - **Adapters**: Concrete stores and sources (memory, YAML file, env vars, CLI)
//! - **Service**: `Setting<T>`, the layered store and the shared store
//!
//! # Reading Rules
//!
//! - A key that was never written reads as the setting's default.
//! - A key holding a value of the wrong shape also reads as the default.
//! - A stored zero, `false` or empty string is a real value, not a miss.
//! - Writing `None` to an optional setting removes the key, and it reads back as `None`.
//!
//! # Feature Flags
//!
//! - `yaml`: Enable the YAML file store (default)
//! - `env`: Enable the environment variable source (default)
//! - `cli`: Enable the command-line argument source (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use hexstore::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let store = Arc::new(MemoryStore::new());
//!
//! let retries = Setting::builder("retryCount", || 3i64)
//!     .store(store.clone())
//!     .on_change(|value: &i64| println!("retryCount is now {}", value))
//!     .build()?;
//!
//! assert_eq!(retries.get(), 3);
//! retries.set(5)?;
//! assert_eq!(retries.get(), 5);
//! assert_eq!(store.integer(retries.key())?, 5);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod codec;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::MemoryStore;
    pub use crate::codec::{RawRepresentable, Storable, StoreObject};
    pub use crate::domain::{Data, Decoded, Result, StoreError, StoreKey, StoreValue};
    pub use crate::ports::{KeyValueStore, SettingsSource, StoreFormat};
    pub use crate::service::{
        install_shared_store, shared_store, LayeredStore, LayeredStoreBuilder, Setting,
        SettingBuilder,
    };

    // Re-export adapters based on feature flags
    #[cfg(feature = "cli")]
    pub use crate::adapters::CommandLineSource;
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarSource;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlFileStore, YamlFormat};
}
