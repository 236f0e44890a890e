//! Storage trait definitions.
//!
//! These traits define the interface for storage backends, enabling swapping
//! between different implementations without changing business logic.
//! Every mutating method runs as a single atomic unit: it either fully
//! applies or leaves the store untouched.

use async_trait::async_trait;

use crate::domain::{
    Mission, MissionChanges, MissionWithPlanet, MissionWithScientist, NewMission, NewPlanet,
    NewScientist, Planet, PlanetChanges, Scientist, ScientistChanges,
};
use crate::error::StorageResult;

/// Scientist persistence.
#[async_trait]
pub trait ScientistStore: Send + Sync {
    /// List all scientists ordered by id.
    async fn list_scientists(&self) -> StorageResult<Vec<Scientist>>;

    /// Get a scientist by id.
    async fn get_scientist(&self, id: i64) -> StorageResult<Option<Scientist>>;

    /// Insert a scientist and return the stored row.
    async fn insert_scientist(&self, new: &NewScientist) -> StorageResult<Scientist>;

    /// Apply the present fields of `changes`.
    ///
    /// Returns `None` if no scientist has this id.
    async fn update_scientist(
        &self,
        id: i64,
        changes: &ScientistChanges,
    ) -> StorageResult<Option<Scientist>>;

    /// Delete a scientist and its missions. Returns `false` if absent.
    async fn delete_scientist(&self, id: i64) -> StorageResult<bool>;
}

/// Planet persistence.
#[async_trait]
pub trait PlanetStore: Send + Sync {
    /// List all planets ordered by id.
    async fn list_planets(&self) -> StorageResult<Vec<Planet>>;

    /// Get a planet by id.
    async fn get_planet(&self, id: i64) -> StorageResult<Option<Planet>>;

    /// Insert a planet and return the stored row.
    async fn insert_planet(&self, new: &NewPlanet) -> StorageResult<Planet>;

    /// Apply the present fields of `changes`.
    async fn update_planet(
        &self,
        id: i64,
        changes: &PlanetChanges,
    ) -> StorageResult<Option<Planet>>;

    /// Delete a planet and its missions. Returns `false` if absent.
    async fn delete_planet(&self, id: i64) -> StorageResult<bool>;
}

/// Mission persistence.
///
/// Inserts and updates that name a missing scientist or planet fail with
/// [`StorageError::Constraint`](crate::error::StorageError::Constraint).
#[async_trait]
pub trait MissionStore: Send + Sync {
    /// List all missions ordered by id.
    async fn list_missions(&self) -> StorageResult<Vec<Mission>>;

    /// Get a mission by id.
    async fn get_mission(&self, id: i64) -> StorageResult<Option<Mission>>;

    /// Insert a mission and return the stored row.
    async fn insert_mission(&self, new: &NewMission) -> StorageResult<Mission>;

    /// Apply the present fields of `changes`.
    async fn update_mission(
        &self,
        id: i64,
        changes: &MissionChanges,
    ) -> StorageResult<Option<Mission>>;

    /// Delete a mission. Returns `false` if absent.
    async fn delete_mission(&self, id: i64) -> StorageResult<bool>;

    /// Missions led by a scientist, with their planets.
    async fn missions_for_scientist(
        &self,
        scientist_id: i64,
    ) -> StorageResult<Vec<MissionWithPlanet>>;

    /// Missions sent to a planet, with their scientists.
    async fn missions_for_planet(&self, planet_id: i64)
    -> StorageResult<Vec<MissionWithScientist>>;
}

/// Combined storage trait for all entity stores.
#[async_trait]
pub trait Storage: ScientistStore + PlanetStore + MissionStore {
    /// Check if the storage backend is healthy and reachable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Get the storage backend name.
    fn backend_name(&self) -> &'static str;

    /// Close all connections. Called once at shutdown.
    async fn close(&self);
}
