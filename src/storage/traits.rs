//! Entity store traits.

use crate::models::{Cast, CastId, Movie, MovieId, NewCast, NewMovie};
use crate::Result;
use async_trait::async_trait;

/// Store backend for cast records.
///
/// Backends are the authoritative source of truth for casts. Handlers hold
/// them as `Arc<dyn CastStore>` so tests can substitute the in-memory
/// implementation.
#[async_trait]
pub trait CastStore: Send + Sync {
    /// Inserts a new cast and returns its assigned id.
    async fn insert(&self, new: &NewCast) -> Result<CastId>;

    /// Lists all casts.
    async fn list(&self) -> Result<Vec<Cast>>;

    /// Retrieves a cast by id.
    async fn get(&self, id: CastId) -> Result<Option<Cast>>;

    /// Overwrites the cast stored under `id` and echoes the id back.
    async fn update(&self, id: CastId, cast: &Cast) -> Result<CastId>;
}

/// Store backend for movie records.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Inserts a new movie and returns its assigned id.
    async fn insert(&self, new: &NewMovie) -> Result<MovieId>;

    /// Lists all movies.
    async fn list(&self) -> Result<Vec<Movie>>;

    /// Retrieves a movie by id.
    async fn get(&self, id: MovieId) -> Result<Option<Movie>>;

    /// Overwrites the movie stored under `id` and echoes the id back.
    async fn update(&self, id: MovieId, movie: &Movie) -> Result<MovieId>;

    /// Deletes a movie by id. Returns whether a row was removed.
    async fn delete(&self, id: MovieId) -> Result<bool>;
}
