// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conformance for types backed by a raw value, typically fieldless enums.

use crate::codec::storable::{Storable, StoreObject};
use crate::domain::{Decoded, Result, StoreKey};
use crate::ports::KeyValueStore;

/// A type that converts to and from a storable raw value.
///
/// Implement this, then call [`storable_raw_value!`](crate::storable_raw_value)
/// to make the type [`Storable`]. A stored raw value that maps to no case
/// decodes as [`Decoded::Failed`].
///
/// # Examples
///
/// ```rust
/// use hexstore::adapters::MemoryStore;
/// use hexstore::codec::{RawRepresentable, Storable};
/// use hexstore::domain::{Decoded, StoreKey};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Theme {
///     Light = 0,
///     Dark = 1,
/// }
///
/// impl RawRepresentable for Theme {
///     type Raw = i64;
///
///     fn raw_value(&self) -> i64 {
///         *self as i64
///     }
///
///     fn from_raw_value(raw: i64) -> Option<Self> {
///         match raw {
///             0 => Some(Theme::Light),
///             1 => Some(Theme::Dark),
///             _ => None,
///         }
///     }
/// }
///
/// hexstore::storable_raw_value!(Theme);
///
/// let store = MemoryStore::new();
/// let key = StoreKey::new("theme").unwrap();
/// Theme::Dark.encode(&store, &key).unwrap();
/// assert_eq!(Theme::decode(&store, &key).unwrap(), Decoded::Present(Theme::Dark));
/// ```
pub trait RawRepresentable: Sized {
    /// The storable type of the raw value.
    type Raw: Storable + StoreObject;

    /// Returns the raw value for `self`.
    fn raw_value(&self) -> Self::Raw;

    /// Returns the case for `raw`, or `None` if there is none.
    fn from_raw_value(raw: Self::Raw) -> Option<Self>;
}

/// Decodes the raw value with its own codec, then converts it.
pub fn decode_raw<T: RawRepresentable>(
    store: &dyn KeyValueStore,
    key: &StoreKey,
) -> Result<Decoded<T>> {
    Ok(match T::Raw::decode(store, key)? {
        Decoded::Present(raw) => {
            let decoded = Decoded::from_conversion(T::from_raw_value(raw));
            if decoded.is_failed() {
                tracing::debug!(
                    "Raw value under '{}' in '{}' matches no {}",
                    key,
                    store.name(),
                    std::any::type_name::<T>()
                );
            }
            decoded
        }
        Decoded::Absent => Decoded::Absent,
        Decoded::Failed => Decoded::Failed,
    })
}

/// Encodes the raw value with its own codec.
pub fn encode_raw<T: RawRepresentable>(
    value: &T,
    store: &dyn KeyValueStore,
    key: &StoreKey,
) -> Result<()> {
    value.raw_value().encode(store, key)
}

/// Implements [`Storable`] and [`StoreObject`] for types that implement
/// [`RawRepresentable`].
#[macro_export]
macro_rules! storable_raw_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::codec::StoreObject for $ty {
                fn from_object(value: $crate::domain::StoreValue) -> Option<Self> {
                    <<$ty as $crate::codec::RawRepresentable>::Raw as $crate::codec::StoreObject>::from_object(value)
                        .and_then(<$ty as $crate::codec::RawRepresentable>::from_raw_value)
                }

                fn to_object(&self) -> $crate::domain::StoreValue {
                    $crate::codec::StoreObject::to_object(
                        &$crate::codec::RawRepresentable::raw_value(self),
                    )
                }
            }

            impl $crate::codec::Storable for $ty {
                fn decode(
                    store: &dyn $crate::ports::KeyValueStore,
                    key: &$crate::domain::StoreKey,
                ) -> $crate::domain::Result<$crate::domain::Decoded<Self>> {
                    $crate::codec::decode_raw(store, key)
                }

                fn encode(
                    &self,
                    store: &dyn $crate::ports::KeyValueStore,
                    key: &$crate::domain::StoreKey,
                ) -> $crate::domain::Result<()> {
                    $crate::codec::encode_raw(self, store, key)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use crate::domain::StoreValue;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Quality {
        Low = 0,
        High = 1,
    }

    impl RawRepresentable for Quality {
        type Raw = i64;

        fn raw_value(&self) -> i64 {
            *self as i64
        }

        fn from_raw_value(raw: i64) -> Option<Self> {
            match raw {
                0 => Some(Quality::Low),
                1 => Some(Quality::High),
                _ => None,
            }
        }
    }

    crate::storable_raw_value!(Quality);

    #[derive(Debug, Clone, PartialEq)]
    enum Channel {
        Stable,
        Beta,
    }

    impl RawRepresentable for Channel {
        type Raw = String;

        fn raw_value(&self) -> String {
            match self {
                Channel::Stable => "stable".to_string(),
                Channel::Beta => "beta".to_string(),
            }
        }

        fn from_raw_value(raw: String) -> Option<Self> {
            match raw.as_str() {
                "stable" => Some(Channel::Stable),
                "beta" => Some(Channel::Beta),
                _ => None,
            }
        }
    }

    crate::storable_raw_value!(Channel);

    #[test]
    fn test_raw_roundtrip() {
        let store = MemoryStore::new();
        let key = StoreKey::from("quality");

        Quality::High.encode(&store, &key).unwrap();
        assert_eq!(store.object(&key).unwrap(), Some(StoreValue::Integer(1)));
        assert_eq!(Quality::decode(&store, &key).unwrap(), Decoded::Present(Quality::High));
    }

    #[test]
    fn test_unknown_raw_value_fails() {
        let store = MemoryStore::new();
        let key = StoreKey::from("quality");
        store.set_integer(&key, 99).unwrap();
        assert_eq!(Quality::decode(&store, &key).unwrap(), Decoded::Failed);
    }

    #[test]
    fn test_raw_absent() {
        let store = MemoryStore::new();
        let key = StoreKey::from("quality");
        assert_eq!(Quality::decode(&store, &key).unwrap(), Decoded::Absent);
    }

    #[test]
    fn test_string_raw_value() {
        let store = MemoryStore::new();
        let key = StoreKey::from("channel");

        Channel::Beta.encode(&store, &key).unwrap();
        assert_eq!(Channel::decode(&store, &key).unwrap(), Decoded::Present(Channel::Beta));

        store.set_string(&key, "nightly").unwrap();
        assert_eq!(Channel::decode(&store, &key).unwrap(), Decoded::Failed);
    }

    #[test]
    fn test_raw_values_in_containers() {
        let store = MemoryStore::new();
        let key = StoreKey::from("history");
        let history = vec![Channel::Stable, Channel::Beta];

        history.encode(&store, &key).unwrap();
        assert_eq!(Vec::<Channel>::decode(&store, &key).unwrap(), Decoded::Present(history));
    }
}
