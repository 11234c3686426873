// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic object representation held by a store.
//!
//! This module provides the `StoreValue` type, the untyped value a store keeps
//! under each key, together with the lenient conversions the store's native
//! typed accessors apply to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use url::Url;

/// An untyped value as kept by a key-value store.
///
/// Values serialize as `{type, value}` pairs so that URLs, dates and binary
/// blobs keep their identity when written to a text file.
///
/// # Examples
///
/// ```
/// use hexstore::domain::store_value::StoreValue;
///
/// let value = StoreValue::from("42");
/// assert_eq!(value.as_integer(), Some(42));
/// assert_eq!(value.as_string().as_deref(), Some("42"));
///
/// let value = StoreValue::from(true);
/// assert_eq!(value.as_bool(), Some(true));
/// assert_eq!(value.as_integer(), Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StoreValue {
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Integer(i64),
    /// A double-precision float.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// An absolute URL.
    Url(Url),
    /// A point in time.
    Date(DateTime<Utc>),
    /// An opaque binary blob.
    Data(Vec<u8>),
    /// An ordered sequence of values.
    Array(Vec<StoreValue>),
    /// A string-keyed mapping of values.
    Dictionary(BTreeMap<String, StoreValue>),
}

impl StoreValue {
    /// Returns a short name for the variant, for log messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            StoreValue::Bool(_) => "bool",
            StoreValue::Integer(_) => "integer",
            StoreValue::Float(_) => "float",
            StoreValue::String(_) => "string",
            StoreValue::Url(_) => "url",
            StoreValue::Date(_) => "date",
            StoreValue::Data(_) => "data",
            StoreValue::Array(_) => "array",
            StoreValue::Dictionary(_) => "dictionary",
        }
    }

    /// Converts the value to an integer the way a native integer accessor does.
    ///
    /// Floats are truncated, booleans become 0 or 1 and strings are parsed
    /// (as an integer first, then as a float).
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            StoreValue::Integer(i) => Some(*i),
            StoreValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            StoreValue::Bool(b) => Some(i64::from(*b)),
            StoreValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
            }
            _ => None,
        }
    }

    /// Converts the value to a boolean the way a native boolean accessor does.
    ///
    /// Recognizes the following strings (case-insensitive):
    /// - `true`: "true", "yes", "1", "on"
    /// - `false`: "false", "no", "0", "off"
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StoreValue::Bool(b) => Some(*b),
            StoreValue::Integer(i) => Some(*i != 0),
            StoreValue::Float(f) => Some(*f != 0.0),
            StoreValue::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "1" | "on" => Some(true),
                "false" | "no" | "0" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Converts the value to a double the way a native double accessor does.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            StoreValue::Float(f) => Some(*f),
            StoreValue::Integer(i) => Some(*i as f64),
            StoreValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            StoreValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Converts the value to a string the way a native string accessor does.
    ///
    /// Numbers are rendered in decimal; every other non-string variant yields
    /// `None`.
    pub fn as_string(&self) -> Option<String> {
        match self {
            StoreValue::String(s) => Some(s.clone()),
            StoreValue::Integer(i) => Some(i.to_string()),
            StoreValue::Float(f) => Some(f.to_string()),
            _ => None,
        }
    }

    /// Converts the value to a URL the way a native URL accessor does.
    ///
    /// Strings are parsed as absolute URLs; an absolute filesystem path turns
    /// into a `file://` URL.
    pub fn as_url(&self) -> Option<Url> {
        match self {
            StoreValue::Url(url) => Some(url.clone()),
            StoreValue::String(s) => Url::parse(s).ok().or_else(|| {
                let path = Path::new(s);
                if path.is_absolute() {
                    Url::from_file_path(path).ok()
                } else {
                    None
                }
            }),
            _ => None,
        }
    }

    /// Returns the elements if this is an array made only of strings.
    pub fn as_string_array(&self) -> Option<Vec<String>> {
        match self {
            StoreValue::Array(items) => items
                .iter()
                .map(|item| match item {
                    StoreValue::String(s) => Some(s.clone()),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    /// Returns the elements if this is an array.
    pub fn as_array(&self) -> Option<&[StoreValue]> {
        match self {
            StoreValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a dictionary.
    pub fn as_dictionary(&self) -> Option<&BTreeMap<String, StoreValue>> {
        match self {
            StoreValue::Dictionary(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the bytes if this is a binary blob.
    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            StoreValue::Data(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a date.
    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            StoreValue::Date(date) => Some(*date),
            _ => None,
        }
    }
}

/// An opaque binary blob.
///
/// `Vec<u8>` already means "ordered sequence of small integers" to the codec
/// registry, so blobs get their own type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Data(pub Vec<u8>);

impl Data {
    /// Returns the bytes as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Converts the blob into its inner bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Data {
    fn from(bytes: Vec<u8>) -> Self {
        Data(bytes)
    }
}

impl From<&[u8]> for Data {
    fn from(bytes: &[u8]) -> Self {
        Data(bytes.to_vec())
    }
}

macro_rules! integer_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for StoreValue {
                fn from(value: $ty) -> Self {
                    StoreValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for StoreValue {
    fn from(value: bool) -> Self {
        StoreValue::Bool(value)
    }
}

impl From<f32> for StoreValue {
    fn from(value: f32) -> Self {
        StoreValue::Float(f64::from(value))
    }
}

impl From<f64> for StoreValue {
    fn from(value: f64) -> Self {
        StoreValue::Float(value)
    }
}

impl From<String> for StoreValue {
    fn from(value: String) -> Self {
        StoreValue::String(value)
    }
}

impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        StoreValue::String(value.to_string())
    }
}

impl From<Url> for StoreValue {
    fn from(value: Url) -> Self {
        StoreValue::Url(value)
    }
}

impl From<DateTime<Utc>> for StoreValue {
    fn from(value: DateTime<Utc>) -> Self {
        StoreValue::Date(value)
    }
}

impl From<Data> for StoreValue {
    fn from(value: Data) -> Self {
        StoreValue::Data(value.0)
    }
}

impl From<Vec<StoreValue>> for StoreValue {
    fn from(value: Vec<StoreValue>) -> Self {
        StoreValue::Array(value)
    }
}

impl From<BTreeMap<String, StoreValue>> for StoreValue {
    fn from(value: BTreeMap<String, StoreValue>) -> Self {
        StoreValue::Dictionary(value)
    }
}

impl fmt::Display for StoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreValue::Bool(b) => write!(f, "{}", b),
            StoreValue::Integer(i) => write!(f, "{}", i),
            StoreValue::Float(x) => write!(f, "{}", x),
            StoreValue::String(s) => write!(f, "{}", s),
            StoreValue::Url(url) => write!(f, "{}", url),
            StoreValue::Date(date) => write!(f, "{}", date.to_rfc3339()),
            StoreValue::Data(bytes) => write!(f, "<{} bytes>", bytes.len()),
            StoreValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            StoreValue::Dictionary(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}
