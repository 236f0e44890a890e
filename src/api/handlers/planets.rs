//! Planet resource handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::api::extractors::{EntityId, JsonBody};
use crate::api::state::AppState;
use crate::domain::{NewPlanet, Planet, PlanetChanges, PlanetDetail};
use crate::error::{AppError, Result};

/// List all planets.
///
/// # Errors
///
/// Returns an error if storage fails.
pub async fn list_planets(State(state): State<AppState>) -> Result<Json<Vec<Planet>>> {
    Ok(Json(state.planet_service.list().await?))
}

/// Create a planet.
///
/// # Errors
///
/// Returns a 400 validation error if the body is malformed or a field is invalid.
pub async fn create_planet(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<NewPlanet>,
) -> Result<(StatusCode, Json<Planet>)> {
    let planet = state.planet_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(planet)))
}

/// Get a planet with the missions sent to it.
///
/// # Errors
///
/// Returns 404 if the planet does not exist.
pub async fn get_planet(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<PlanetDetail>> {
    Ok(Json(state.planet_service.get(id).await?))
}

/// Update a planet.
///
/// # Errors
///
/// Returns 404 if the planet does not exist, even when the body is also
/// invalid, or 400 if the body is invalid.
pub async fn update_planet(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    body: std::result::Result<JsonBody<PlanetChanges>, AppError>,
) -> Result<(StatusCode, Json<Planet>)> {
    let JsonBody(changes) = match body {
        Ok(body) => body,
        Err(err) => {
            state.planet_service.ensure_exists(id).await?;
            return Err(err);
        }
    };
    let planet = state.planet_service.update(id, changes).await?;
    Ok((StatusCode::ACCEPTED, Json(planet)))
}

/// Delete a planet and its missions.
///
/// # Errors
///
/// Returns 404 if the planet does not exist.
pub async fn delete_planet(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<StatusCode> {
    state.planet_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
