// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed codec registry.
//!
//! This module contains the [`Storable`] contract that lets a value type read
//! itself from, and write itself to, a [`KeyValueStore`](crate::ports::KeyValueStore),
//! together with the built-in conformances:
//!
//! | Type | Read through |
//! |---|---|
//! | `i8`..`i64`, `u8`..`u32` | native integer conversion, range-checked |
//! | `bool` | native boolean conversion |
//! | `f32`, `f64` | native float/double conversion |
//! | `String` | native string conversion |
//! | `url::Url` | native URL conversion |
//! | `DateTime<Utc>`, [`Data`](crate::domain::Data), [`StoreValue`](crate::domain::StoreValue) | generic object |
//! | `Vec<T>`, `BTreeMap<String, T>`, `HashMap<String, T>` | generic object, element-wise downcast |
//! | `Option<T>` | the wrapped type; a missing key reads as `None`, writing `None` removes the key |
//! | [`RawRepresentable`] types | the raw value's codec |
//!
//! Dispatch is static: the conformance is picked at compile time from the
//! value type.

pub mod containers;
pub mod primitives;
pub mod raw;
pub mod storable;

// Re-export commonly used types
pub use raw::{decode_raw, encode_raw, RawRepresentable};
pub use storable::{decode_native, decode_object, encode_object, Storable, StoreObject};
