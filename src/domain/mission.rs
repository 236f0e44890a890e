//! Mission entity, payloads and relationship views.

use serde::{Deserialize, Serialize};

use super::{Planet, Scientist, Validate, check_optional_text, check_text};

/// A mission row: one scientist sent to one planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Mission {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
}

/// A mission with both of its relations expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionDetail {
    #[serde(flatten)]
    pub mission: Mission,
    pub scientist: Scientist,
    pub planet: Planet,
}

/// A mission as seen from its scientist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionWithPlanet {
    #[serde(flatten)]
    pub mission: Mission,
    pub planet: Planet,
}

/// A mission as seen from its planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionWithScientist {
    #[serde(flatten)]
    pub mission: Mission,
    pub scientist: Scientist,
}

/// Payload for creating a mission.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMission {
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
}

impl Validate for NewMission {
    fn validate(&self) -> Result<(), String> {
        check_text("name", &self.name)
    }
}

/// Payload for updating a mission. References may be moved, but only to
/// rows that exist.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MissionChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub scientist_id: Option<i64>,
    #[serde(default)]
    pub planet_id: Option<i64>,
}

impl Validate for MissionChanges {
    fn validate(&self) -> Result<(), String> {
        check_optional_text("name", self.name.as_deref())
    }
}
