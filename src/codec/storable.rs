// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `Storable` contract and its default, object-based implementation.

use crate::domain::{Decoded, Result, StoreKey, StoreValue};
use crate::ports::KeyValueStore;

/// Strict conversion between a Rust value and the store's generic object
/// representation.
///
/// `from_object` is a downcast: it succeeds only when the object already has
/// the expected shape. Container conformances use it for their elements, so a
/// `Vec<String>` holding a number fails to decode rather than silently
/// rendering the number as text.
pub trait StoreObject: Sized {
    /// Attempts to downcast a stored object to `Self`.
    fn from_object(value: StoreValue) -> Option<Self>;

    /// Converts `self` into a storable object.
    fn to_object(&self) -> StoreValue;
}

/// A value type that knows how to read itself from, and write itself to, a
/// flat string-keyed store.
///
/// Decoding never fails because of the stored value's shape: a missing key is
/// [`Decoded::Absent`], a value of the wrong shape is [`Decoded::Failed`]. The
/// `Err` side is reserved for the store itself failing.
///
/// Most types get their implementation from [`decode_object`] and
/// [`encode_object`] through the [`storable_object!`](crate::storable_object)
/// macro; primitives override them to go through the store's native typed
/// accessors.
///
/// # Examples
///
/// ```rust
/// use hexstore::adapters::MemoryStore;
/// use hexstore::codec::{Storable, StoreObject};
/// use hexstore::domain::{Decoded, StoreKey, StoreValue};
///
/// #[derive(Debug, PartialEq)]
/// struct Celsius(f64);
///
/// impl StoreObject for Celsius {
///     fn from_object(value: StoreValue) -> Option<Self> {
///         match value {
///             StoreValue::Float(f) => Some(Celsius(f)),
///             _ => None,
///         }
///     }
///
///     fn to_object(&self) -> StoreValue {
///         StoreValue::Float(self.0)
///     }
/// }
///
/// hexstore::storable_object!(Celsius);
///
/// let store = MemoryStore::new();
/// let key = StoreKey::new("temperature").unwrap();
/// Celsius(21.5).encode(&store, &key).unwrap();
/// assert_eq!(Celsius::decode(&store, &key).unwrap(), Decoded::Present(Celsius(21.5)));
/// ```
pub trait Storable: Sized {
    /// Reads the value stored under `key`.
    fn decode(store: &dyn KeyValueStore, key: &StoreKey) -> Result<Decoded<Self>>;

    /// Writes `self` under `key`, replacing any previous value.
    fn encode(&self, store: &dyn KeyValueStore, key: &StoreKey) -> Result<()>;
}

/// Default decode: generic object read followed by a strict downcast.
pub fn decode_object<T: StoreObject>(
    store: &dyn KeyValueStore,
    key: &StoreKey,
) -> Result<Decoded<T>> {
    match store.object(key)? {
        Some(value) => {
            let kind = value.type_name();
            let decoded = Decoded::from_conversion(T::from_object(value));
            if decoded.is_failed() {
                tracing::debug!(
                    "Stored {} under '{}' in '{}' is not a {}",
                    kind,
                    key,
                    store.name(),
                    std::any::type_name::<T>()
                );
            }
            Ok(decoded)
        }
        None => Ok(Decoded::Absent),
    }
}

/// Default encode: generic object write.
pub fn encode_object<T: StoreObject>(
    value: &T,
    store: &dyn KeyValueStore,
    key: &StoreKey,
) -> Result<()> {
    store.set_object(key, value.to_object())
}

/// Decode through a native accessor conversion, checking for the key first.
///
/// The platform's native integer, boolean and floating-point getters cannot
/// tell "absent" from "zero". Reading the object once and converting it here
/// keeps the native conversion rules while still reporting a missing key as
/// [`Decoded::Absent`].
pub fn decode_native<T, F>(
    store: &dyn KeyValueStore,
    key: &StoreKey,
    convert: F,
) -> Result<Decoded<T>>
where
    F: FnOnce(&StoreValue) -> Option<T>,
{
    match store.object(key)? {
        Some(value) => {
            let decoded = Decoded::from_conversion(convert(&value));
            if decoded.is_failed() {
                tracing::debug!(
                    "Stored {} under '{}' in '{}' does not convert to {}",
                    value.type_name(),
                    key,
                    store.name(),
                    std::any::type_name::<T>()
                );
            }
            Ok(decoded)
        }
        None => Ok(Decoded::Absent),
    }
}

/// Implements [`Storable`] for types that already implement [`StoreObject`],
/// using the default object-based decode and encode.
#[macro_export]
macro_rules! storable_object {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::codec::Storable for $ty {
                fn decode(
                    store: &dyn $crate::ports::KeyValueStore,
                    key: &$crate::domain::StoreKey,
                ) -> $crate::domain::Result<$crate::domain::Decoded<Self>> {
                    $crate::codec::decode_object(store, key)
                }

                fn encode(
                    &self,
                    store: &dyn $crate::ports::KeyValueStore,
                    key: &$crate::domain::StoreKey,
                ) -> $crate::domain::Result<()> {
                    $crate::codec::encode_object(self, store, key)
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;

    #[derive(Debug, PartialEq)]
    struct Label(String);

    impl StoreObject for Label {
        fn from_object(value: StoreValue) -> Option<Self> {
            match value {
                StoreValue::String(s) => Some(Label(s)),
                _ => None,
            }
        }

        fn to_object(&self) -> StoreValue {
            StoreValue::String(self.0.clone())
        }
    }

    crate::storable_object!(Label);

    #[test]
    fn test_decode_object_absent() {
        let store = MemoryStore::new();
        let key = StoreKey::from("label");
        assert_eq!(decode_object::<Label>(&store, &key).unwrap(), Decoded::Absent);
    }

    #[test]
    fn test_decode_object_wrong_shape() {
        let store = MemoryStore::new();
        let key = StoreKey::from("label");
        store.set_object(&key, StoreValue::Integer(3)).unwrap();
        assert_eq!(decode_object::<Label>(&store, &key).unwrap(), Decoded::Failed);
    }

    #[test]
    fn test_macro_roundtrip() {
        let store = MemoryStore::new();
        let key = StoreKey::from("label");
        Label("hello".to_string()).encode(&store, &key).unwrap();
        assert_eq!(
            Label::decode(&store, &key).unwrap(),
            Decoded::Present(Label("hello".to_string()))
        );
    }

    #[test]
    fn test_decode_native() {
        let store = MemoryStore::new();
        let key = StoreKey::from("n");

        let absent = decode_native(&store, &key, |v| v.as_integer()).unwrap();
        assert_eq!(absent, Decoded::Absent);

        store.set_object(&key, StoreValue::from("12")).unwrap();
        let present = decode_native(&store, &key, |v| v.as_integer()).unwrap();
        assert_eq!(present, Decoded::Present(12));

        store.set_object(&key, StoreValue::from("twelve")).unwrap();
        let failed = decode_native(&store, &key, |v| v.as_integer()).unwrap();
        assert_eq!(failed, Decoded::Failed);
    }
}
