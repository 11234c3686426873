// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome of decoding a typed value from a store.

/// The result of reading a key as a particular type.
///
/// Store I/O failures are not represented here; they travel as the `Err` side
/// of the surrounding [`Result`](crate::domain::Result).
///
/// # Examples
///
/// ```
/// use hexstore::domain::Decoded;
///
/// let present = Decoded::Present(3);
/// assert_eq!(present.unwrap_or_else(|| 0), 3);
///
/// let failed: Decoded<i32> = Decoded::from_conversion(None);
/// assert!(failed.is_failed());
/// assert_eq!(failed.unwrap_or_else(|| 7), 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded<T> {
    /// A value of the requested type is stored under the key.
    Present(T),
    /// Nothing is stored under the key.
    Absent,
    /// Something is stored under the key but it does not convert to the
    /// requested type.
    Failed,
}

impl<T> Decoded<T> {
    /// Maps the outcome of a conversion attempt: `None` means the stored value
    /// had the wrong shape.
    pub fn from_conversion(value: Option<T>) -> Self {
        match value {
            Some(value) => Decoded::Present(value),
            None => Decoded::Failed,
        }
    }

    /// Returns `true` if a value was decoded.
    pub fn is_present(&self) -> bool {
        matches!(self, Decoded::Present(_))
    }

    /// Returns `true` if nothing was stored.
    pub fn is_absent(&self) -> bool {
        matches!(self, Decoded::Absent)
    }

    /// Returns `true` if the stored value had the wrong shape.
    pub fn is_failed(&self) -> bool {
        matches!(self, Decoded::Failed)
    }

    /// Applies `f` to a decoded value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Decoded<U> {
        match self {
            Decoded::Present(value) => Decoded::Present(f(value)),
            Decoded::Absent => Decoded::Absent,
            Decoded::Failed => Decoded::Failed,
        }
    }

    /// Converts into an `Option`, folding `Absent` and `Failed` together.
    pub fn into_option(self) -> Option<T> {
        match self {
            Decoded::Present(value) => Some(value),
            Decoded::Absent | Decoded::Failed => None,
        }
    }

    /// Returns the decoded value or computes a fallback.
    pub fn unwrap_or_else<F: FnOnce() -> T>(self, fallback: F) -> T {
        match self {
            Decoded::Present(value) => value,
            Decoded::Absent | Decoded::Failed => fallback(),
        }
    }
}
