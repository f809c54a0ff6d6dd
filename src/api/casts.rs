//! Cast registry handlers.

use super::{ApiError, CastState, ensure_no_query};
use crate::Error;
use crate::models::{Cast, CastId, CastPatch, NewCast};
use crate::services::Merge;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

/// Routes for the cast registry, mounted under the service prefix.
pub fn router() -> Router<CastState> {
    Router::new()
        .route("/", get(list_casts).post(create_cast))
        .route("/{id}/", get(get_cast).put(update_cast))
}

async fn list_casts(
    State(state): State<CastState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Cast>>, ApiError> {
    ensure_no_query(query.as_deref())?;
    Ok(Json(state.store.list().await?))
}

async fn create_cast(
    State(state): State<CastState>,
    payload: Result<Json<NewCast>, JsonRejection>,
) -> Result<(StatusCode, Json<Cast>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let id = state.store.insert(&payload).await?;
    tracing::info!(%id, "cast created");

    Ok((StatusCode::CREATED, Json(Cast::from_new(id, payload))))
}

async fn get_cast(
    State(state): State<CastState>,
    id: Result<Path<CastId>, PathRejection>,
) -> Result<Json<Cast>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::validation(e.body_text()))?;

    match state.store.get(id).await? {
        Some(cast) => Ok(Json(cast)),
        None => Err(not_found(id)),
    }
}

async fn update_cast(
    State(state): State<CastState>,
    id: Result<Path<CastId>, PathRejection>,
    payload: Result<Json<CastPatch>, JsonRejection>,
) -> Result<Json<Cast>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::validation(e.body_text()))?;
    let Json(patch) = payload.map_err(|e| ApiError::validation(e.body_text()))?;

    let Some(current) = state.store.get(id).await? else {
        return Err(not_found(id));
    };

    let merged = current.merge(&patch);
    state.store.update(id, &merged).await?;

    Ok(Json(merged))
}

fn not_found(id: CastId) -> ApiError {
    Error::NotFound {
        entity: "Cast",
        id: id.get(),
    }
    .into()
}
