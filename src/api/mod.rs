//! HTTP API surface for both services.
//!
//! Each service is an axum application: a router nested under its
//! `/api/v1/…` prefix with request tracing layered on top. State is injected
//! as trait objects so the test suites run against in-memory backends.

mod casts;
mod error;
mod movies;

pub use error::ApiError;

use crate::services::ReferentialValidator;
use crate::storage::{CastStore, MovieStore};
use crate::Error;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state of the cast registry service.
#[derive(Clone)]
pub struct CastState {
    /// The cast store backend.
    pub store: Arc<dyn CastStore>,
}

/// Shared state of the movie catalog service.
#[derive(Clone)]
pub struct MovieState {
    /// The movie store backend.
    pub store: Arc<dyn MovieStore>,
    /// Validator probing the cast service for referenced ids.
    pub validator: ReferentialValidator,
}

/// Builds the cast registry application.
#[must_use]
pub fn cast_app(state: CastState) -> Router {
    Router::new()
        .nest("/api/v1/casts", casts::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Builds the movie catalog application.
#[must_use]
pub fn movie_app(state: MovieState) -> Router {
    Router::new()
        .nest("/api/v1/movies", movies::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Rejects collection requests that carry query parameters.
///
/// A bare `?` counts as no parameters, matching the falsy check the
/// endpoints have always had.
fn ensure_no_query(query: Option<&str>) -> crate::Result<()> {
    match query {
        Some(q) if !q.is_empty() => Err(Error::UnsupportedQueryParameters),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_no_query() {
        assert!(ensure_no_query(None).is_ok());
        assert!(ensure_no_query(Some("")).is_ok());
        assert!(ensure_no_query(Some("x=1")).is_err());
    }
}
