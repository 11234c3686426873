// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module contains the fundamental types of the crate: keys, the untyped
//! values a store holds, the three-way decode outcome and the error type. It
//! is independent of any concrete store.

pub mod decoded;
pub mod errors;
pub mod store_key;
pub mod store_value;

// Re-export commonly used types
pub use decoded::Decoded;
pub use errors::{Result, StoreError};
pub use store_key::StoreKey;
pub use store_value::{Data, StoreValue};
