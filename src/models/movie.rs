//! Movie records and their payload types.

use super::{CastId, Patch};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a movie record, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(i64);

impl MovieId {
    /// Creates a movie id from a raw integer.
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

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MovieId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A movie of the catalog.
///
/// `cast_ids` are foreign references into the cast registry. They are checked
/// against the cast service at write time only; nothing prevents a referenced
/// cast from disappearing afterwards. Duplicates and ordering carry no
/// semantics, but insertion order is preserved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Identifier assigned on creation, immutable thereafter.
    pub id: MovieId,
    /// Title.
    pub name: String,
    /// Plot summary.
    pub plot: String,
    /// Genre labels.
    pub genres: Vec<String>,
    /// Referenced cast identifiers.
    pub cast_ids: Vec<CastId>,
}

impl Movie {
    /// Builds the full record for a newly inserted movie.
    #[must_use]
    pub fn from_new(id: MovieId, new: NewMovie) -> Self {
        Self {
            id,
            name: new.name,
            plot: new.plot,
            genres: new.genres,
            cast_ids: new.cast_ids,
        }
    }
}

/// Creation payload for a movie. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMovie {
    /// Title. Required.
    pub name: String,
    /// Plot summary. Required.
    pub plot: String,
    /// Genre labels. Required (may be empty).
    pub genres: Vec<String>,
    /// Referenced cast identifiers. Required (may be empty).
    pub cast_ids: Vec<CastId>,
}

/// Partial update payload for a movie.
///
/// Every field distinguishes "omitted" from "sent" (see [`Patch`]); there is
/// deliberately no id field. An update only re-validates cast references when
/// `cast_ids` is actually sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviePatch {
    /// New title, when sent.
    #[serde(default)]
    pub name: Patch<String>,
    /// New plot summary, when sent.
    #[serde(default)]
    pub plot: Patch<String>,
    /// New genre labels, when sent. An empty list overwrites.
    #[serde(default)]
    pub genres: Patch<Vec<String>>,
    /// New cast references, when sent. An empty list overwrites.
    #[serde(default)]
    pub cast_ids: Patch<Vec<CastId>>,
}

impl MoviePatch {
    /// Returns `true` if no field was sent.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_absent()
            && self.plot.is_absent()
            && self.genres.is_absent()
            && self.cast_ids.is_absent()
    }
}
