//! # Marquee
//!
//! Cooperating cast-registry and movie-catalog HTTP services.
//!
//! Marquee ships two small CRUD services from one binary: a **cast registry**
//! holding actor records, and a **movie catalog** whose entries reference
//! casts by identifier. The movie service validates those references against
//! the cast service's read endpoint before any write commits, and both
//! services support partial updates that merge only the fields the caller
//! actually sent.
//!
//! ## Example
//!
//! ```rust,ignore
//! use marquee::api::{CastState, cast_app};
//! use marquee::storage::MemoryCastStore;
//! use std::sync::Arc;
//!
//! let state = CastState {
//!     store: Arc::new(MemoryCastStore::new()),
//! };
//! let app = cast_app(state);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::{CastServiceConfig, MovieServiceConfig};
pub use models::{Cast, CastId, CastPatch, Movie, MovieId, MoviePatch, NewCast, NewMovie, Patch};
pub use services::{HttpCastClient, Merge, ReferenceChecker, ReferentialValidator};
pub use storage::{CastStore, MovieStore};

/// Error type for marquee operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
/// The HTTP layer maps each variant onto a status code in [`api::ApiError`].
#[derive(Debug, ThisError)]
pub enum Error {
    /// The request payload or a path parameter failed validation.
    ///
    /// Raised when:
    /// - JSON deserialization fails (missing fields, wrong types, bad syntax)
    /// - A path identifier is not a valid integer
    #[error("validation failed: {0}")]
    Validation(String),

    /// An entity, or an entity referenced by the request, does not exist.
    ///
    /// The message names the missing identifier so multi-reference failures
    /// are attributable to a specific id.
    #[error("{entity} with given id {id} not found")]
    NotFound {
        /// The kind of entity that was looked up ("Cast" or "Movie").
        entity: &'static str,
        /// The identifier that did not resolve.
        id: i64,
    },

    /// A collection endpoint was called with query parameters.
    #[error("This endpoint does not support query parameters.")]
    UnsupportedQueryParameters,

    /// An operation failed.
    ///
    /// Raised when:
    /// - `SQLite` operations fail
    /// - Stored row data cannot be decoded
    /// - The listen port cannot be bound or the server loop errors
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Builds an [`Error::OperationFailed`] from an operation name and a cause.
    pub fn operation_failed(operation: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for marquee operations.
pub type Result<T> = std::result::Result<T, Error>;
