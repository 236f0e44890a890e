//! `SQLite` storage backend.
//!
//! Rows live in three tables (`scientists`, `planets`, `missions`) created by
//! the embedded migrations under `migrations/`. Foreign keys are enabled on
//! every pooled connection so deleting a scientist or planet cascades to its
//! missions and a mission can never reference a missing row.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::domain::{
    Mission, MissionChanges, MissionWithPlanet, MissionWithScientist, NewMission, NewPlanet,
    NewScientist, Planet, PlanetChanges, Scientist, ScientistChanges,
};
use crate::error::StorageResult;
use crate::storage::traits::{MissionStore, PlanetStore, ScientistStore, Storage};

static MIGRATOR: Migrator = sqlx::migrate!();

/// `SQLite`-backed storage.
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open the database described by `config`, creating the file if needed.
    ///
    /// An in-memory URL is pinned to a single long-lived connection, since
    /// every new connection would otherwise see its own empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the database cannot be opened,
    /// or migrations fail.
    pub async fn connect(config: &DatabaseConfig) -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = config.url.contains(":memory:");
        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.acquire_timeout));
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            pool_options.max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        let storage = Self { pool };

        if config.run_migrations {
            storage.migrate().await?;
        }

        Ok(storage)
    }

    /// Apply any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails to apply.
    pub async fn migrate(&self) -> StorageResult<()> {
        MIGRATOR.run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}

/// A mission joined with its planet.
#[derive(sqlx::FromRow)]
struct MissionPlanetRow {
    id: i64,
    name: String,
    scientist_id: i64,
    planet_id: i64,
    planet_name: String,
    planet_distance_from_earth: i64,
    planet_nearest_star: String,
}

impl From<MissionPlanetRow> for MissionWithPlanet {
    fn from(row: MissionPlanetRow) -> Self {
        Self {
            mission: Mission {
                id: row.id,
                name: row.name,
                scientist_id: row.scientist_id,
                planet_id: row.planet_id,
            },
            planet: Planet {
                id: row.planet_id,
                name: row.planet_name,
                distance_from_earth: row.planet_distance_from_earth,
                nearest_star: row.planet_nearest_star,
            },
        }
    }
}

/// A mission joined with its scientist.
#[derive(sqlx::FromRow)]
struct MissionScientistRow {
    id: i64,
    name: String,
    scientist_id: i64,
    planet_id: i64,
    scientist_name: String,
    scientist_field_of_study: String,
}

impl From<MissionScientistRow> for MissionWithScientist {
    fn from(row: MissionScientistRow) -> Self {
        Self {
            mission: Mission {
                id: row.id,
                name: row.name,
                scientist_id: row.scientist_id,
                planet_id: row.planet_id,
            },
            scientist: Scientist {
                id: row.scientist_id,
                name: row.scientist_name,
                field_of_study: row.scientist_field_of_study,
            },
        }
    }
}

#[async_trait]
impl ScientistStore for SqliteStorage {
    async fn list_scientists(&self) -> StorageResult<Vec<Scientist>> {
        let rows = sqlx::query_as::<_, Scientist>(
            "SELECT id, name, field_of_study FROM scientists ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_scientist(&self, id: i64) -> StorageResult<Option<Scientist>> {
        let row = sqlx::query_as::<_, Scientist>(
            "SELECT id, name, field_of_study FROM scientists WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_scientist(&self, new: &NewScientist) -> StorageResult<Scientist> {
        let row = sqlx::query_as::<_, Scientist>(
            "INSERT INTO scientists (name, field_of_study) VALUES (?, ?) \
             RETURNING id, name, field_of_study",
        )
        .bind(&new.name)
        .bind(&new.field_of_study)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = row.id, "Inserted scientist");
        Ok(row)
    }

    async fn update_scientist(
        &self,
        id: i64,
        changes: &ScientistChanges,
    ) -> StorageResult<Option<Scientist>> {
        let row = sqlx::query_as::<_, Scientist>(
            "UPDATE scientists SET \
                 name = COALESCE(?1, name), \
                 field_of_study = COALESCE(?2, field_of_study) \
             WHERE id = ?3 \
             RETURNING id, name, field_of_study",
        )
        .bind(changes.name.as_deref())
        .bind(changes.field_of_study.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_scientist(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM scientists WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PlanetStore for SqliteStorage {
    async fn list_planets(&self) -> StorageResult<Vec<Planet>> {
        let rows = sqlx::query_as::<_, Planet>(
            "SELECT id, name, distance_from_earth, nearest_star FROM planets ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_planet(&self, id: i64) -> StorageResult<Option<Planet>> {
        let row = sqlx::query_as::<_, Planet>(
            "SELECT id, name, distance_from_earth, nearest_star FROM planets WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_planet(&self, new: &NewPlanet) -> StorageResult<Planet> {
        let row = sqlx::query_as::<_, Planet>(
            "INSERT INTO planets (name, distance_from_earth, nearest_star) VALUES (?, ?, ?) \
             RETURNING id, name, distance_from_earth, nearest_star",
        )
        .bind(&new.name)
        .bind(new.distance_from_earth)
        .bind(&new.nearest_star)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = row.id, "Inserted planet");
        Ok(row)
    }

    async fn update_planet(
        &self,
        id: i64,
        changes: &PlanetChanges,
    ) -> StorageResult<Option<Planet>> {
        let row = sqlx::query_as::<_, Planet>(
            "UPDATE planets SET \
                 name = COALESCE(?1, name), \
                 distance_from_earth = COALESCE(?2, distance_from_earth), \
                 nearest_star = COALESCE(?3, nearest_star) \
             WHERE id = ?4 \
             RETURNING id, name, distance_from_earth, nearest_star",
        )
        .bind(changes.name.as_deref())
        .bind(changes.distance_from_earth)
        .bind(changes.nearest_star.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_planet(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM planets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl MissionStore for SqliteStorage {
    async fn list_missions(&self) -> StorageResult<Vec<Mission>> {
        let rows = sqlx::query_as::<_, Mission>(
            "SELECT id, name, scientist_id, planet_id FROM missions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_mission(&self, id: i64) -> StorageResult<Option<Mission>> {
        let row = sqlx::query_as::<_, Mission>(
            "SELECT id, name, scientist_id, planet_id FROM missions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_mission(&self, new: &NewMission) -> StorageResult<Mission> {
        let row = sqlx::query_as::<_, Mission>(
            "INSERT INTO missions (name, scientist_id, planet_id) VALUES (?, ?, ?) \
             RETURNING id, name, scientist_id, planet_id",
        )
        .bind(&new.name)
        .bind(new.scientist_id)
        .bind(new.planet_id)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = row.id, "Inserted mission");
        Ok(row)
    }

    async fn update_mission(
        &self,
        id: i64,
        changes: &MissionChanges,
    ) -> StorageResult<Option<Mission>> {
        let row = sqlx::query_as::<_, Mission>(
            "UPDATE missions SET \
                 name = COALESCE(?1, name), \
                 scientist_id = COALESCE(?2, scientist_id), \
                 planet_id = COALESCE(?3, planet_id) \
             WHERE id = ?4 \
             RETURNING id, name, scientist_id, planet_id",
        )
        .bind(changes.name.as_deref())
        .bind(changes.scientist_id)
        .bind(changes.planet_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_mission(&self, id: i64) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM missions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn missions_for_scientist(
        &self,
        scientist_id: i64,
    ) -> StorageResult<Vec<MissionWithPlanet>> {
        let rows = sqlx::query_as::<_, MissionPlanetRow>(
            "SELECT m.id, m.name, m.scientist_id, m.planet_id, \
                    p.name AS planet_name, \
                    p.distance_from_earth AS planet_distance_from_earth, \
                    p.nearest_star AS planet_nearest_star \
             FROM missions m \
             JOIN planets p ON p.id = m.planet_id \
             WHERE m.scientist_id = ? \
             ORDER BY m.id",
        )
        .bind(scientist_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn missions_for_planet(
        &self,
        planet_id: i64,
    ) -> StorageResult<Vec<MissionWithScientist>> {
        let rows = sqlx::query_as::<_, MissionScientistRow>(
            "SELECT m.id, m.name, m.scientist_id, m.planet_id, \
                    s.name AS scientist_name, \
                    s.field_of_study AS scientist_field_of_study \
             FROM missions m \
             JOIN scientists s ON s.id = m.scientist_id \
             WHERE m.planet_id = ? \
             ORDER BY m.id",
        )
        .bind(planet_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn health_check(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
