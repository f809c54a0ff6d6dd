//! Cast records and their payload types.

use super::Patch;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a cast record, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CastId(i64);

impl CastId {
    /// Creates a cast id from a raw integer.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CastId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A cast member of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    /// Identifier assigned on creation, immutable thereafter.
    pub id: CastId,
    /// Display name. Required.
    pub name: String,
    /// Nationality, if known.
    pub nationality: Option<String>,
}

impl Cast {
    /// Builds the full record for a newly inserted cast.
    #[must_use]
    pub fn from_new(id: CastId, new: NewCast) -> Self {
        Self {
            id,
            name: new.name,
            nationality: new.nationality,
        }
    }
}

/// Creation payload for a cast. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCast {
    /// Display name. Required.
    pub name: String,
    /// Nationality, if known.
    #[serde(default)]
    pub nationality: Option<String>,
}

/// Partial update payload for a cast.
///
/// Every field distinguishes "omitted" from "sent" (see [`Patch`]); there is
/// deliberately no id field, so a patch can never reassign an identifier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CastPatch {
    /// New display name, when sent.
    #[serde(default)]
    pub name: Patch<String>,
    /// New nationality, when sent. An explicit `null` clears the field.
    #[serde(default)]
    pub nationality: Patch<Option<String>>,
}

impl CastPatch {
    /// Returns `true` if no field was sent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_absent() && self.nationality.is_absent()
    }
}
