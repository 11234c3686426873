// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conformances for sequences, mappings and optionals.

use crate::codec::storable::{decode_object, encode_object, Storable, StoreObject};
use crate::domain::{Decoded, Result, StoreKey, StoreValue};
use crate::ports::KeyValueStore;
use std::collections::{BTreeMap, HashMap};

// `Vec<String>` goes through the same element-wise downcast, which matches the
// native string-array accessor: any non-string element fails the whole read.
impl<T: StoreObject> StoreObject for Vec<T> {
    fn from_object(value: StoreValue) -> Option<Self> {
        match value {
            StoreValue::Array(items) => items.into_iter().map(T::from_object).collect(),
            _ => None,
        }
    }

    fn to_object(&self) -> StoreValue {
        StoreValue::Array(self.iter().map(StoreObject::to_object).collect())
    }
}

impl<T: StoreObject> Storable for Vec<T> {
    fn decode(store: &dyn KeyValueStore, key: &StoreKey) -> Result<Decoded<Self>> {
        decode_object(store, key)
    }

    fn encode(&self, store: &dyn KeyValueStore, key: &StoreKey) -> Result<()> {
        encode_object(self, store, key)
    }
}

impl<T: StoreObject> StoreObject for BTreeMap<String, T> {
    fn from_object(value: StoreValue) -> Option<Self> {
        match value {
            StoreValue::Dictionary(entries) => entries
                .into_iter()
                .map(|(k, v)| T::from_object(v).map(|v| (k, v)))
                .collect(),
            _ => None,
        }
    }

    fn to_object(&self) -> StoreValue {
        StoreValue::Dictionary(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_object()))
                .collect(),
        )
    }
}

impl<T: StoreObject> Storable for BTreeMap<String, T> {
    fn decode(store: &dyn KeyValueStore, key: &StoreKey) -> Result<Decoded<Self>> {
        decode_object(store, key)
    }

    fn encode(&self, store: &dyn KeyValueStore, key: &StoreKey) -> Result<()> {
        encode_object(self, store, key)
    }
}

impl<T: StoreObject> StoreObject for HashMap<String, T> {
    fn from_object(value: StoreValue) -> Option<Self> {
        match value {
            StoreValue::Dictionary(entries) => entries
                .into_iter()
                .map(|(k, v)| T::from_object(v).map(|v| (k, v)))
                .collect(),
            _ => None,
        }
    }

    fn to_object(&self) -> StoreValue {
        StoreValue::Dictionary(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_object()))
                .collect(),
        )
    }
}

impl<T: StoreObject> Storable for HashMap<String, T> {
    fn decode(store: &dyn KeyValueStore, key: &StoreKey) -> Result<Decoded<Self>> {
        decode_object(store, key)
    }

    fn encode(&self, store: &dyn KeyValueStore, key: &StoreKey) -> Result<()> {
        encode_object(self, store, key)
    }
}

/// An optional value is stored as its wrapped value, or not at all.
///
/// A missing key decodes as `Present(None)`: for an optional, absence is a
/// value, so the binding's default is not consulted. A stored value of the
/// wrong shape is still [`Decoded::Failed`]. Writing `None` removes the key.
impl<T: Storable> Storable for Option<T> {
    fn decode(store: &dyn KeyValueStore, key: &StoreKey) -> Result<Decoded<Self>> {
        Ok(match T::decode(store, key)? {
            Decoded::Present(value) => Decoded::Present(Some(value)),
            Decoded::Absent => Decoded::Present(None),
            Decoded::Failed => Decoded::Failed,
        })
    }

    fn encode(&self, store: &dyn KeyValueStore, key: &StoreKey) -> Result<()> {
        match self {
            Some(value) => value.encode(store, key),
            None => store.remove_object(key),
        }
    }
}
