//! Scientist resource handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::api::extractors::{EntityId, JsonBody};
use crate::api::state::AppState;
use crate::domain::{NewScientist, Scientist, ScientistChanges, ScientistDetail};
use crate::error::{AppError, Result};

/// List all scientists (summary view).
///
/// # Errors
///
/// Returns an error if storage fails.
pub async fn list_scientists(State(state): State<AppState>) -> Result<Json<Vec<Scientist>>> {
    let scientists = state.scientist_service.list().await?;
    Ok(Json(scientists))
}

/// Create a scientist.
///
/// # Errors
///
/// Returns a 400 validation error if the body is malformed or a field is empty.
pub async fn create_scientist(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewScientist>,
) -> Result<(StatusCode, Json<ScientistDetail>)> {
    let scientist = state.scientist_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(scientist)))
}

/// Get a scientist with their missions.
///
/// # Errors
///
/// Returns 404 if the scientist does not exist.
pub async fn get_scientist(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<ScientistDetail>> {
    let scientist = state.scientist_service.get(id).await?;
    Ok(Json(scientist))
}

/// Update a scientist's name and/or field of study.
///
/// # Errors
///
/// Returns 404 if the scientist does not exist, even when the body is also
/// invalid, or 400 if the body is invalid.
pub async fn update_scientist(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    body: std::result::Result<JsonBody<ScientistChanges>, AppError>,
) -> Result<(StatusCode, Json<Scientist>)> {
    let JsonBody(changes) = match body {
        Ok(body) => body,
        Err(err) => {
            state.scientist_service.ensure_exists(id).await?;
            return Err(err);
        }
    };
    let scientist = state.scientist_service.update(id, changes).await?;
    Ok((StatusCode::ACCEPTED, Json(scientist)))
}

/// Delete a scientist and their missions.
///
/// # Errors
///
/// Returns 404 if the scientist does not exist.
pub async fn delete_scientist(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<StatusCode> {
    state.scientist_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
