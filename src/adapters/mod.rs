// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing store and source implementations.
//!
//! Stores implement [`KeyValueStore`](crate::ports::KeyValueStore) and accept
//! writes; sources implement [`SettingsSource`](crate::ports::SettingsSource)
//! and are read-only layers stacked above a store by a
//! [`LayeredStore`](crate::service::LayeredStore).

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "env")]
pub mod env_var;
pub mod memory;
#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export adapters based on feature flags
#[cfg(feature = "cli")]
pub use cli::CommandLineSource;
#[cfg(feature = "env")]
pub use env_var::EnvVarSource;
pub use memory::MemoryStore;
#[cfg(feature = "yaml")]
pub use yaml_file::{YamlFileStore, YamlFormat};
