//! Planet service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{EntityKind, NewPlanet, Planet, PlanetChanges, PlanetDetail, Validate};
use crate::error::{AppError, Result};
use crate::service::{Operation, record_change};
use crate::storage::traits::Storage;

/// Service for planet records.
pub struct PlanetService {
    storage: Arc<dyn Storage>,
}

impl PlanetService {
    /// Create a new planet service.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// List all planets.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn list(&self) -> Result<Vec<Planet>> {
        Ok(self.storage.list_planets().await?)
    }

    /// Get a planet with the missions sent to it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, or an error if storage fails.
    pub async fn get(&self, id: i64) -> Result<PlanetDetail> {
        let planet = self
            .storage
            .get_planet(id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Planet))?;
        let missions = self.storage.missions_for_planet(id).await?;

        Ok(PlanetDetail { planet, missions })
    }

    /// Create a planet.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a text field is empty, or an error if storage fails.
    pub async fn create(&self, new: NewPlanet) -> Result<Planet> {
        new.validate().map_err(AppError::Validation)?;

        let planet = self.storage.insert_planet(&new).await?;
        record_change(EntityKind::Planet, Operation::Create);
        info!(id = planet.id, "Planet created");

        Ok(planet)
    }

    /// Check that a planet exists.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, or an error if storage fails.
    pub async fn ensure_exists(&self, id: i64) -> Result<()> {
        self.storage
            .get_planet(id)
            .await?
            .map(|_| ())
            .ok_or(AppError::NotFound(EntityKind::Planet))
    }

    /// Update the fields present in `changes`.
    ///
    /// An unknown id is reported before the changes are checked.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, a validation error if a present
    /// text field is empty, or an error if storage fails.
    pub async fn update(&self, id: i64, changes: PlanetChanges) -> Result<Planet> {
        self.ensure_exists(id).await?;
        changes.validate().map_err(AppError::Validation)?;

        let planet = self
            .storage
            .update_planet(id, &changes)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Planet))?;
        record_change(EntityKind::Planet, Operation::Update);
        info!(id, "Planet updated");

        Ok(planet)
    }

    /// Delete a planet and the missions sent to it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, or an error if storage fails.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.storage.delete_planet(id).await? {
            return Err(AppError::NotFound(EntityKind::Planet));
        }
        record_change(EntityKind::Planet, Operation::Delete);
        info!(id, "Planet deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::tests::memory_storage;

    #[tokio::test]
    async fn test_planet_lifecycle() {
        let service = PlanetService::new(memory_storage().await);

        let created = service
            .create(NewPlanet {
                name: "Maxxamillion".to_string(),
                distance_from_earth: 8_780_000,
                nearest_star: "Canopus".to_string(),
            })
            .await
            .unwrap();
        let id = created.id;
        assert_eq!(created.nearest_star, "Canopus");

        let updated = service
            .update(
                id,
                PlanetChanges {
                    nearest_star: Some("Vega".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.nearest_star, "Vega");
        assert_eq!(updated.distance_from_earth, 8_780_000);

        let detail = service.get(id).await.unwrap();
        assert_eq!(detail.planet, updated);
        assert!(detail.missions.is_empty());

        service.delete(id).await.unwrap();
        assert!(matches!(
            service.get(id).await,
            Err(AppError::NotFound(EntityKind::Planet))
        ));
        assert!(matches!(
            service
                .update(
                    id,
                    PlanetChanges {
                        name: Some(" ".to_string()),
                        ..Default::default()
                    },
                )
                .await,
            Err(AppError::NotFound(EntityKind::Planet))
        ));
        assert!(service.list().await.unwrap().is_empty());
    }
}
