//! Mission service.
//!
//! A mission is only written once both of its references resolve. The
//! lookups identify which reference is dangling; the foreign key constraint
//! still catches a row deleted between the lookup and the write.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    EntityKind, Mission, MissionChanges, MissionDetail, NewMission, Planet, Scientist, Validate,
};
use crate::error::{AppError, Result, StorageError};
use crate::service::{Operation, record_change};
use crate::storage::traits::Storage;

/// Service for mission records.
pub struct MissionService {
    storage: Arc<dyn Storage>,
}

impl MissionService {
    /// Create a new mission service.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// List all missions.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn list(&self) -> Result<Vec<Mission>> {
        Ok(self.storage.list_missions().await?)
    }

    /// Get a mission with its scientist and planet.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, or an error if storage fails.
    pub async fn get(&self, id: i64) -> Result<MissionDetail> {
        let mission = self
            .storage
            .get_mission(id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Mission))?;
        self.expand(mission).await
    }

    /// Create a mission linking an existing scientist and planet.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty or a reference does not
    /// resolve, or an error if storage fails.
    pub async fn create(&self, new: NewMission) -> Result<MissionDetail> {
        new.validate().map_err(AppError::Validation)?;

        let scientist = self.resolve_scientist(new.scientist_id).await?;
        let planet = self.resolve_planet(new.planet_id).await?;

        let mission = self
            .storage
            .insert_mission(&new)
            .await
            .map_err(reference_error)?;
        record_change(EntityKind::Mission, Operation::Create);
        info!(
            id = mission.id,
            scientist_id = mission.scientist_id,
            planet_id = mission.planet_id,
            "Mission created"
        );

        Ok(MissionDetail {
            mission,
            scientist,
            planet,
        })
    }

    /// Check that a mission exists.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, or an error if storage fails.
    pub async fn ensure_exists(&self, id: i64) -> Result<()> {
        self.storage
            .get_mission(id)
            .await?
            .map(|_| ())
            .ok_or(AppError::NotFound(EntityKind::Mission))
    }

    /// Update the fields present in `changes`.
    ///
    /// An unknown id is reported before the changes are checked.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, a validation error if the name is
    /// empty or a new reference does not resolve, or an error if storage fails.
    pub async fn update(&self, id: i64, changes: MissionChanges) -> Result<MissionDetail> {
        self.ensure_exists(id).await?;
        changes.validate().map_err(AppError::Validation)?;

        if let Some(scientist_id) = changes.scientist_id {
            self.resolve_scientist(scientist_id).await?;
        }
        if let Some(planet_id) = changes.planet_id {
            self.resolve_planet(planet_id).await?;
        }

        let mission = self
            .storage
            .update_mission(id, &changes)
            .await
            .map_err(reference_error)?
            .ok_or(AppError::NotFound(EntityKind::Mission))?;
        record_change(EntityKind::Mission, Operation::Update);
        info!(id, "Mission updated");

        self.expand(mission).await
    }

    /// Delete a mission.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, or an error if storage fails.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.storage.delete_mission(id).await? {
            return Err(AppError::NotFound(EntityKind::Mission));
        }
        record_change(EntityKind::Mission, Operation::Delete);
        info!(id, "Mission deleted");
        Ok(())
    }

    async fn expand(&self, mission: Mission) -> Result<MissionDetail> {
        let scientist = self
            .storage
            .get_scientist(mission.scientist_id)
            .await?
            .ok_or_else(|| dangling(&mission, EntityKind::Scientist))?;
        let planet = self
            .storage
            .get_planet(mission.planet_id)
            .await?
            .ok_or_else(|| dangling(&mission, EntityKind::Planet))?;

        Ok(MissionDetail {
            mission,
            scientist,
            planet,
        })
    }

    async fn resolve_scientist(&self, id: i64) -> Result<Scientist> {
        self.storage
            .get_scientist(id)
            .await?
            .ok_or(AppError::InvalidReference {
                kind: EntityKind::Scientist,
                id,
            })
    }

    async fn resolve_planet(&self, id: i64) -> Result<Planet> {
        self.storage
            .get_planet(id)
            .await?
            .ok_or(AppError::InvalidReference {
                kind: EntityKind::Planet,
                id,
            })
    }
}

fn reference_error(err: StorageError) -> AppError {
    match err {
        StorageError::Constraint(message) => AppError::Validation(message),
        other => AppError::Storage(other),
    }
}

fn dangling(mission: &Mission, kind: EntityKind) -> AppError {
    AppError::Internal(format!(
        "mission {} references a missing {}",
        mission.id,
        kind.label()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewPlanet, NewScientist};
    use crate::service::tests::memory_storage;

    async fn seeded() -> (MissionService, Scientist, Planet) {
        let storage = memory_storage().await;
        let scientist = storage
            .insert_scientist(&NewScientist {
                name: "Evan Horizon".to_string(),
                field_of_study: "Astronavigation".to_string(),
            })
            .await
            .unwrap();
        let planet = storage
            .insert_planet(&NewPlanet {
                name: "Kepler-22b".to_string(),
                distance_from_earth: 600,
                nearest_star: "Kepler-22".to_string(),
            })
            .await
            .unwrap();
        (MissionService::new(storage), scientist, planet)
    }

    #[tokio::test]
    async fn test_create_expands_relations() {
        let (service, scientist, planet) = seeded().await;

        let detail = service
            .create(NewMission {
                name: "Explore Kepler".to_string(),
                scientist_id: scientist.id,
                planet_id: planet.id,
            })
            .await
            .unwrap();
        assert_eq!(detail.scientist, scientist);
        assert_eq!(detail.planet, planet);
        assert_eq!(service.get(detail.mission.id).await.unwrap(), detail);
    }

    #[tokio::test]
    async fn test_create_with_dangling_reference() {
        let (service, scientist, _) = seeded().await;

        let result = service
            .create(NewMission {
                name: "Explore Nowhere".to_string(),
                scientist_id: scientist.id,
                planet_id: 404,
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::InvalidReference {
                kind: EntityKind::Planet,
                id: 404
            })
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (service, scientist, planet) = seeded().await;
        let detail = service
            .create(NewMission {
                name: "Explore Kepler".to_string(),
                scientist_id: scientist.id,
                planet_id: planet.id,
            })
            .await
            .unwrap();
        let id = detail.mission.id;

        let updated = service
            .update(
                id,
                MissionChanges {
                    name: Some("Survey Kepler".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.mission.name, "Survey Kepler");
        assert_eq!(updated.mission.planet_id, planet.id);

        let moved = service
            .update(
                id,
                MissionChanges {
                    scientist_id: Some(999),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(moved, Err(AppError::InvalidReference { .. })));

        service.delete(id).await.unwrap();
        assert!(matches!(
            service.get(id).await,
            Err(AppError::NotFound(EntityKind::Mission))
        ));
        assert!(matches!(
            service
                .update(
                    id,
                    MissionChanges {
                        planet_id: Some(999),
                        ..Default::default()
                    },
                )
                .await,
            Err(AppError::NotFound(EntityKind::Mission))
        ));
    }
}
