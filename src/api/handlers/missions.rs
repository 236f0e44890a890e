//! Mission resource handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::api::extractors::{EntityId, JsonBody};
use crate::api::state::AppState;
use crate::domain::{Mission, MissionChanges, MissionDetail, NewMission};
use crate::error::{AppError, Result};

/// List all missions.
///
/// # Errors
///
/// Returns an error if storage fails.
pub async fn list_missions(State(state): State<AppState>) -> Result<Json<Vec<Mission>>> {
    Ok(Json(state.mission_service.list().await?))
}

/// Create a mission for an existing scientist and planet.
///
/// # Errors
///
/// Returns a 400 validation error if the body is malformed or a reference
/// does not resolve.
pub async fn create_mission(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewMission>,
) -> Result<(StatusCode, Json<MissionDetail>)> {
    let mission = state.mission_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(mission)))
}

/// Get a mission with its scientist and planet.
///
/// # Errors
///
/// Returns 404 if the mission does not exist.
pub async fn get_mission(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<MissionDetail>> {
    Ok(Json(state.mission_service.get(id).await?))
}

/// Update a mission.
///
/// # Errors
///
/// Returns 404 if the mission does not exist, even when the body is also
/// invalid, or 400 if the body is invalid.
pub async fn update_mission(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    body: std::result::Result<JsonBody<MissionChanges>, AppError>,
) -> Result<(StatusCode, Json<MissionDetail>)> {
    let JsonBody(changes) = match body {
        Ok(body) => body,
        Err(err) => {
            state.mission_service.ensure_exists(id).await?;
            return Err(err);
        }
    };
    let mission = state.mission_service.update(id, changes).await?;
    Ok((StatusCode::ACCEPTED, Json(mission)))
}

/// Delete a mission.
///
/// # Errors
///
/// Returns 404 if the mission does not exist.
pub async fn delete_mission(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<StatusCode> {
    state.mission_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
