//! Scientist service.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    EntityKind, NewScientist, Scientist, ScientistChanges, ScientistDetail, Validate,
};
use crate::error::{AppError, Result};
use crate::service::{Operation, record_change};
use crate::storage::traits::Storage;

/// Service for scientist records.
pub struct ScientistService {
    /// Storage backend.
    storage: Arc<dyn Storage>,
}

impl ScientistService {
    /// Create a new scientist service.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// List all scientists.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub async fn list(&self) -> Result<Vec<Scientist>> {
        Ok(self.storage.list_scientists().await?)
    }

    /// Get a scientist with the missions they lead.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, or an error if storage fails.
    pub async fn get(&self, id: i64) -> Result<ScientistDetail> {
        let scientist = self
            .storage
            .get_scientist(id)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Scientist))?;
        let missions = self.storage.missions_for_scientist(id).await?;

        Ok(ScientistDetail {
            scientist,
            missions,
        })
    }

    /// Create a scientist.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is empty, or an error if storage fails.
    pub async fn create(&self, new: NewScientist) -> Result<ScientistDetail> {
        new.validate().map_err(AppError::Validation)?;

        let scientist = self.storage.insert_scientist(&new).await?;
        record_change(EntityKind::Scientist, Operation::Create);
        info!(id = scientist.id, "Scientist created");

        Ok(ScientistDetail {
            scientist,
            missions: Vec::new(),
        })
    }

    /// Check that a scientist exists.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, or an error if storage fails.
    pub async fn ensure_exists(&self, id: i64) -> Result<()> {
        self.storage
            .get_scientist(id)
            .await?
            .map(|_| ())
            .ok_or(AppError::NotFound(EntityKind::Scientist))
    }

    /// Update the fields present in `changes`.
    ///
    /// An unknown id is reported before the changes are checked.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, a validation error if a present
    /// field is empty, or an error if storage fails.
    pub async fn update(&self, id: i64, changes: ScientistChanges) -> Result<Scientist> {
        self.ensure_exists(id).await?;
        changes.validate().map_err(AppError::Validation)?;

        let scientist = self
            .storage
            .update_scientist(id, &changes)
            .await?
            .ok_or(AppError::NotFound(EntityKind::Scientist))?;
        record_change(EntityKind::Scientist, Operation::Update);
        info!(id, "Scientist updated");

        Ok(scientist)
    }

    /// Delete a scientist and the missions they lead.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown, or an error if storage fails.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.storage.delete_scientist(id).await? {
            return Err(AppError::NotFound(EntityKind::Scientist));
        }
        record_change(EntityKind::Scientist, Operation::Delete);
        info!(id, "Scientist deleted");
        Ok(())
    }
}
