//! Optional-field wrapper for partial update payloads.
//!
//! JSON cannot natively distinguish a field the caller omitted from a field
//! the caller explicitly set to `null`. [`Patch`] makes that distinction
//! representable: a field declared as `Patch<T>` with `#[serde(default)]`
//! deserializes to [`Patch::Absent`] when missing and to [`Patch::Set`]
//! whenever the field is present, including `Patch::Set(None)` for an
//! explicit `null` when `T` is an `Option`.

use serde::{Deserialize, Deserializer};

/// A field of a partial update payload.
///
/// `Absent` means "leave the current value untouched"; `Set` means "overwrite
/// with this value", even when the value is empty or `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// The caller did not send this field.
    Absent,
    /// The caller sent this field with the given value.
    Set(T),
}

impl<T> Patch<T> {
    /// Returns `true` if the field was omitted from the payload.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` if the field was present in the payload.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Returns the patched value, if one was sent.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Absent => None,
            Self::Set(value) => Some(value),
        }
    }

    /// Resolves the field against the current value: the patch value when
    /// present, a clone of `current` otherwise.
    #[must_use]
    pub fn cloned_or(&self, current: &T) -> T
    where
        T: Clone,
    {
        match self {
            Self::Absent => current.clone(),
            Self::Set(value) => value.clone(),
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

// Serde only invokes Deserialize for fields that are present in the input,
// so deserialization always produces `Set`; `Absent` comes from the
// `#[serde(default)]` on the containing struct's field.
impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::Set)
    }
}
