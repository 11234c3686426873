// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conformances for scalar types.
//!
//! Integers, booleans, floats, strings and URLs read through the store's
//! native conversions (so `"42"` set by an environment variable reads as the
//! integer 42) but report a missing key as absent. Dates, blobs and raw
//! `StoreValue`s use the default object codec.

use crate::codec::storable::{decode_native, Storable, StoreObject};
use crate::domain::{Data, Decoded, Result, StoreKey, StoreValue};
use crate::ports::KeyValueStore;
use chrono::{DateTime, Utc};
use url::Url;

macro_rules! storable_integer {
    ($($ty:ty),*) => {
        $(
            impl StoreObject for $ty {
                fn from_object(value: StoreValue) -> Option<Self> {
                    match value {
                        StoreValue::Integer(i) => <$ty>::try_from(i).ok(),
                        _ => None,
                    }
                }

                fn to_object(&self) -> StoreValue {
                    StoreValue::Integer(i64::from(*self))
                }
            }

            impl Storable for $ty {
                fn decode(store: &dyn KeyValueStore, key: &StoreKey) -> Result<Decoded<Self>> {
                    decode_native(store, key, |v| {
                        v.as_integer().and_then(|i| <$ty>::try_from(i).ok())
                    })
                }

                fn encode(&self, store: &dyn KeyValueStore, key: &StoreKey) -> Result<()> {
                    store.set_integer(key, i64::from(*self))
                }
            }
        )*
    };
}

storable_integer!(i8, i16, i32, i64, u8, u16, u32);

impl StoreObject for bool {
    fn from_object(value: StoreValue) -> Option<Self> {
        match value {
            StoreValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    fn to_object(&self) -> StoreValue {
        StoreValue::Bool(*self)
    }
}

impl Storable for bool {
    fn decode(store: &dyn KeyValueStore, key: &StoreKey) -> Result<Decoded<Self>> {
        decode_native(store, key, StoreValue::as_bool)
    }

    fn encode(&self, store: &dyn KeyValueStore, key: &StoreKey) -> Result<()> {
        store.set_bool(key, *self)
    }
}

impl StoreObject for f64 {
    fn from_object(value: StoreValue) -> Option<Self> {
        match value {
            StoreValue::Float(f) => Some(f),
            StoreValue::Integer(i) => Some(i as f64),
            _ => None,
        }
    }

    fn to_object(&self) -> StoreValue {
        StoreValue::Float(*self)
    }
}

impl Storable for f64 {
    fn decode(store: &dyn KeyValueStore, key: &StoreKey) -> Result<Decoded<Self>> {
        decode_native(store, key, StoreValue::as_double)
    }

    fn encode(&self, store: &dyn KeyValueStore, key: &StoreKey) -> Result<()> {
        store.set_double(key, *self)
    }
}

impl StoreObject for f32 {
    fn from_object(value: StoreValue) -> Option<Self> {
        f64::from_object(value).map(|f| f as f32)
    }

    fn to_object(&self) -> StoreValue {
        StoreValue::Float(f64::from(*self))
    }
}

impl Storable for f32 {
    fn decode(store: &dyn KeyValueStore, key: &StoreKey) -> Result<Decoded<Self>> {
        decode_native(store, key, |v| v.as_double().map(|f| f as f32))
    }

    fn encode(&self, store: &dyn KeyValueStore, key: &StoreKey) -> Result<()> {
        store.set_float(key, *self)
    }
}

impl StoreObject for String {
    fn from_object(value: StoreValue) -> Option<Self> {
        match value {
            StoreValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn to_object(&self) -> StoreValue {
        StoreValue::String(self.clone())
    }
}

impl Storable for String {
    fn decode(store: &dyn KeyValueStore, key: &StoreKey) -> Result<Decoded<Self>> {
        decode_native(store, key, StoreValue::as_string)
    }

    fn encode(&self, store: &dyn KeyValueStore, key: &StoreKey) -> Result<()> {
        store.set_object(key, self.to_object())
    }
}

impl StoreObject for Url {
    fn from_object(value: StoreValue) -> Option<Self> {
        match value {
            StoreValue::Url(url) => Some(url),
            _ => None,
        }
    }

    fn to_object(&self) -> StoreValue {
        StoreValue::Url(self.clone())
    }
}

impl Storable for Url {
    fn decode(store: &dyn KeyValueStore, key: &StoreKey) -> Result<Decoded<Self>> {
        decode_native(store, key, StoreValue::as_url)
    }

    fn encode(&self, store: &dyn KeyValueStore, key: &StoreKey) -> Result<()> {
        store.set_url(key, self)
    }
}

impl StoreObject for DateTime<Utc> {
    fn from_object(value: StoreValue) -> Option<Self> {
        value.as_date()
    }

    fn to_object(&self) -> StoreValue {
        StoreValue::Date(*self)
    }
}

impl StoreObject for Data {
    fn from_object(value: StoreValue) -> Option<Self> {
        match value {
            StoreValue::Data(bytes) => Some(Data(bytes)),
            _ => None,
        }
    }

    fn to_object(&self) -> StoreValue {
        StoreValue::Data(self.0.clone())
    }
}

impl StoreObject for StoreValue {
    fn from_object(value: StoreValue) -> Option<Self> {
        Some(value)
    }

    fn to_object(&self) -> StoreValue {
        self.clone()
    }
}

crate::storable_object!(DateTime<Utc>, Data, StoreValue);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStore;
    use chrono::TimeZone;

    fn key(name: &str) -> StoreKey {
        StoreKey::new(name).unwrap()
    }

    #[test]
    fn test_integer_roundtrip() {
        let store = MemoryStore::new();
        let k = key("retryCount");
        5i64.encode(&store, &k).unwrap();
        assert_eq!(i64::decode(&store, &k).unwrap(), Decoded::Present(5));
        assert_eq!(store.object(&k).unwrap(), Some(StoreValue::Integer(5)));
    }

    #[test]
    fn test_integer_absent_is_not_zero() {
        let store = MemoryStore::new();
        assert_eq!(i32::decode(&store, &key("retryCount")).unwrap(), Decoded::Absent);
    }

    #[test]
    fn test_integer_stored_zero_is_present() {
        let store = MemoryStore::new();
        let k = key("retryCount");
        0i32.encode(&store, &k).unwrap();
        assert_eq!(i32::decode(&store, &k).unwrap(), Decoded::Present(0));
    }

    #[test]
    fn test_integer_out_of_range_fails() {
        let store = MemoryStore::new();
        let k = key("small");
        store.set_integer(&k, 300).unwrap();
        assert_eq!(u8::decode(&store, &k).unwrap(), Decoded::Failed);
        assert_eq!(i16::decode(&store, &k).unwrap(), Decoded::Present(300));

        store.set_integer(&k, -1).unwrap();
        assert_eq!(u32::decode(&store, &k).unwrap(), Decoded::Failed);
    }

    #[test]
    fn test_integer_from_numeric_string() {
        let store = MemoryStore::new();
        let k = key("port");
        store.set_string(&k, "8080").unwrap();
        assert_eq!(u16::decode(&store, &k).unwrap(), Decoded::Present(8080));
    }

    #[test]
    fn test_integer_from_word_fails() {
        let store = MemoryStore::new();
        let k = key("port");
        store.set_string(&k, "eighty").unwrap();
        assert_eq!(i64::decode(&store, &k).unwrap(), Decoded::Failed);
    }

    #[test]
    fn test_integer_strict_object() {
        assert_eq!(i32::from_object(StoreValue::Integer(4)), Some(4));
        assert_eq!(i32::from_object(StoreValue::from("4")), None);
        assert_eq!(u8::from_object(StoreValue::Integer(-4)), None);
    }

    #[test]
    fn test_bool() {
        let store = MemoryStore::new();
        let k = key("enabled");
        assert_eq!(bool::decode(&store, &k).unwrap(), Decoded::Absent);

        false.encode(&store, &k).unwrap();
        assert_eq!(bool::decode(&store, &k).unwrap(), Decoded::Present(false));

        store.set_string(&k, "yes").unwrap();
        assert_eq!(bool::decode(&store, &k).unwrap(), Decoded::Present(true));

        store.set_string(&k, "perhaps").unwrap();
        assert_eq!(bool::decode(&store, &k).unwrap(), Decoded::Failed);
    }

    #[test]
    fn test_floats() {
        let store = MemoryStore::new();
        let k = key("ratio");
        assert_eq!(f64::decode(&store, &k).unwrap(), Decoded::Absent);

        0.75f64.encode(&store, &k).unwrap();
        assert_eq!(f64::decode(&store, &k).unwrap(), Decoded::Present(0.75));

        1.5f32.encode(&store, &k).unwrap();
        assert_eq!(f32::decode(&store, &k).unwrap(), Decoded::Present(1.5));

        store.set_integer(&k, 2).unwrap();
        assert_eq!(f64::decode(&store, &k).unwrap(), Decoded::Present(2.0));
        assert_eq!(f64::from_object(StoreValue::Integer(2)), Some(2.0));
    }

    #[test]
    fn test_string() {
        let store = MemoryStore::new();
        let k = key("name");
        "Ada".to_string().encode(&store, &k).unwrap();
        assert_eq!(
            String::decode(&store, &k).unwrap(),
            Decoded::Present("Ada".to_string())
        );

        store.set_integer(&k, 3).unwrap();
        assert_eq!(
            String::decode(&store, &k).unwrap(),
            Decoded::Present("3".to_string())
        );

        store.set_bool(&k, true).unwrap();
        assert_eq!(String::decode(&store, &k).unwrap(), Decoded::Failed);
    }

    #[test]
    fn test_url() {
        let store = MemoryStore::new();
        let k = key("endpoint");
        let url = Url::parse("https://api.example.com/v1").unwrap();

        url.encode(&store, &k).unwrap();
        assert_eq!(store.object(&k).unwrap(), Some(StoreValue::Url(url.clone())));
        assert_eq!(Url::decode(&store, &k).unwrap(), Decoded::Present(url.clone()));

        store.set_string(&k, "https://api.example.com/v1").unwrap();
        assert_eq!(Url::decode(&store, &k).unwrap(), Decoded::Present(url));

        store.set_string(&k, "not a url").unwrap();
        assert_eq!(Url::decode(&store, &k).unwrap(), Decoded::Failed);
    }

    #[test]
    fn test_date() {
        let store = MemoryStore::new();
        let k = key("lastSync");
        let date = Utc.with_ymd_and_hms(2023, 11, 14, 8, 30, 0).unwrap();

        date.encode(&store, &k).unwrap();
        assert_eq!(DateTime::<Utc>::decode(&store, &k).unwrap(), Decoded::Present(date));

        store.set_string(&k, "2023-11-14").unwrap();
        assert_eq!(DateTime::<Utc>::decode(&store, &k).unwrap(), Decoded::Failed);
    }

    #[test]
    fn test_data() {
        let store = MemoryStore::new();
        let k = key("token");
        let blob = Data(vec![0xde, 0xad, 0xbe, 0xef]);

        blob.encode(&store, &k).unwrap();
        assert_eq!(Data::decode(&store, &k).unwrap(), Decoded::Present(blob));
    }

    #[test]
    fn test_store_value_passthrough() {
        let store = MemoryStore::new();
        let k = key("raw");
        let value = StoreValue::Array(vec![StoreValue::Integer(1), "two".into()]);

        value.encode(&store, &k).unwrap();
        assert_eq!(StoreValue::decode(&store, &k).unwrap(), Decoded::Present(value));
    }
}
