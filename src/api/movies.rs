//! Movie catalog handlers.
//!
//! Writes are gated on referential validation: a create checks every
//! referenced cast id against the cast service before inserting, and an
//! update checks only when the patch actually touches `cast_ids`. Validation
//! runs before any mutation, so a failed check leaves the store untouched.

use super::{ApiError, MovieState, ensure_no_query};
use crate::Error;
use crate::models::{Movie, MovieId, MoviePatch, NewMovie};
use crate::services::Merge;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

/// Routes for the movie catalog, mounted under the service prefix.
pub fn router() -> Router<MovieState> {
    Router::new()
        .route("/", get(list_movies).post(create_movie))
        .route("/{id}/", get(get_movie).put(update_movie).delete(delete_movie))
}

async fn list_movies(
    State(state): State<MovieState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Movie>>, ApiError> {
    ensure_no_query(query.as_deref())?;
    Ok(Json(state.store.list().await?))
}

async fn create_movie(
    State(state): State<MovieState>,
    payload: Result<Json<NewMovie>, JsonRejection>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    state.validator.ensure_all_exist(&payload.cast_ids).await?;

    let id = state.store.insert(&payload).await?;
    tracing::info!(%id, "movie created");

    Ok((StatusCode::CREATED, Json(Movie::from_new(id, payload))))
}

async fn get_movie(
    State(state): State<MovieState>,
    id: Result<Path<MovieId>, PathRejection>,
) -> Result<Json<Movie>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::validation(e.body_text()))?;

    match state.store.get(id).await? {
        Some(movie) => Ok(Json(movie)),
        None => Err(not_found(id)),
    }
}

async fn update_movie(
    State(state): State<MovieState>,
    id: Result<Path<MovieId>, PathRejection>,
    payload: Result<Json<MoviePatch>, JsonRejection>,
) -> Result<Json<Movie>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::validation(e.body_text()))?;
    let Json(patch) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let Some(current) = state.store.get(id).await? else {
        return Err(not_found(id));
    };

    // References are only re-validated when the patch touches them; an
    // untouched (possibly stale) cast list is left as-is.
    if let Some(cast_ids) = patch.cast_ids.as_set() {
        state.validator.ensure_all_exist(cast_ids).await?;
    }

    let merged = current.merge(&patch);
    state.store.update(id, &merged).await?;

    Ok(Json(merged))
}

async fn delete_movie(
    State(state): State<MovieState>,
    id: Result<Path<MovieId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::validation(e.body_text()))?;

    if !state.store.delete(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(%id, "movie deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: MovieId) -> ApiError {
    Error::NotFound {
        entity: "Movie",
        id: id.get(),
    }
    .into()
}
