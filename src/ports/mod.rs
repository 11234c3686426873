// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the traits that define the boundaries of the crate:
//! the store every setting reads from and writes to, the read-only layers a
//! layered store searches, and the text format of file-backed stores.

pub mod format;
pub mod source;
pub mod store;

// Re-export commonly used types
pub use format::StoreFormat;
pub use source::SettingsSource;
pub use store::KeyValueStore;
