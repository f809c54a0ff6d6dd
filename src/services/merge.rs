//! Partial-update merge engine.
//!
//! Merging is a pure transformation: given the full, previously persisted
//! entity and a partial payload carrying only the fields the caller sent, it
//! produces the full entity to persist. Schema validation happens before the
//! merge (in the request layer) and persistence after it (in the store); this
//! module does neither.

use crate::models::{Cast, CastPatch, Movie, MoviePatch};

/// Merges a partial update payload onto a current entity.
///
/// Fields present in the patch take the patch's value, including explicit
/// `null` and empty sequences. Fields absent from the patch keep the current
/// value. The identifier is always carried over from `current`; a patch
/// cannot reassign it. Merging an empty patch yields an identical entity.
pub trait Merge {
    /// The partial payload type for this entity.
    type Patch;

    /// Produces the fully populated entity to persist.
    #[must_use]
    fn merge(&self, patch: &Self::Patch) -> Self;
}

impl Merge for Cast {
    type Patch = CastPatch;

    fn merge(&self, patch: &CastPatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.cloned_or(&self.name),
            nationality: patch.nationality.cloned_or(&self.nationality),
        }
    }
}

impl Merge for Movie {
    type Patch = MoviePatch;

    fn merge(&self, patch: &MoviePatch) -> Self {
        Self {
            id: self.id,
            name: patch.name.cloned_or(&self.name),
            plot: patch.plot.cloned_or(&self.plot),
            genres: patch.genres.cloned_or(&self.genres),
            cast_ids: patch.cast_ids.cloned_or(&self.cast_ids),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CastId, MovieId, Patch};

    fn sample_cast() -> Cast {
        Cast {
            id: CastId::new(1),
            name: "Daisy Ridley".to_string(),
            nationality: Some("British".to_string()),
        }
    }

    fn sample_movie() -> Movie {
        Movie {
            id: MovieId::new(1),
            name: "The Rise of Skywalker".to_string(),
            plot: "The resistance faces the First Order once again.".to_string(),
            genres: vec!["Action".to_string(), "Fantasy".to_string()],
            cast_ids: vec![CastId::new(1), CastId::new(2)],
        }
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let cast = sample_cast();
        assert_eq!(cast.merge(&CastPatch::default()), cast);

        let movie = sample_movie();
        assert_eq!(movie.merge(&MoviePatch::default()), movie);
    }

    #[test]
    fn test_set_field_overwrites_others_untouched() {
        let cast = sample_cast();
        let patch = CastPatch {
            name: Patch::Set("Adam Driver".to_string()),
            ..CastPatch::default()
        };

        let merged = cast.merge(&patch);
        assert_eq!(merged.name, "Adam Driver");
        assert_eq!(merged.nationality, cast.nationality);
        assert_eq!(merged.id, cast.id);
    }

    #[test]
    fn test_explicit_null_clears_nationality() {
        let cast = sample_cast();
        let patch: CastPatch = serde_json::from_str(r#"{"nationality": null}"#).unwrap();

        let merged = cast.merge(&patch);
        assert_eq!(merged.nationality, None);
        assert_eq!(merged.name, cast.name);
    }

    #[test]
    fn test_empty_list_overwrites() {
        let movie = sample_movie();
        let patch = MoviePatch {
            cast_ids: Patch::Set(Vec::new()),
            ..MoviePatch::default()
        };

        let merged = movie.merge(&patch);
        assert!(merged.cast_ids.is_empty());
        assert_eq!(merged.genres, movie.genres);
    }

    #[test]
    fn test_id_never_taken_from_patch() {
        // Patch payloads carry no id at the type level; merge always copies
        // the current one.
        let movie = sample_movie();
        let patch = MoviePatch {
            name: Patch::Set("Retitled".to_string()),
            ..MoviePatch::default()
        };
        assert_eq!(movie.merge(&patch).id, movie.id);
    }
}
