// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: typed settings and the stores they bind to.
//!
//! [`Setting`] is the main entry point. It reads and writes one key through
//! the codec of its value type, against either the process-wide
//! [`shared_store`] or a store given at construction, such as a
//! [`LayeredStore`].

pub mod layered_store;
pub mod setting;
pub mod shared;

// Re-export commonly used types
pub use layered_store::{LayeredStore, LayeredStoreBuilder};
pub use setting::{Setting, SettingBuilder};
pub use shared::{install_shared_store, shared_store};
