//! Planet entity and payloads.

use serde::{Deserialize, Serialize};

use super::mission::MissionWithScientist;
use super::{Validate, check_optional_text, check_text};

/// A planet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    /// Distance from Earth, in whatever unit clients agree on.
    pub distance_from_earth: i64,
    pub nearest_star: String,
}

/// A planet together with the missions sent to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetDetail {
    #[serde(flatten)]
    pub planet: Planet,
    pub missions: Vec<MissionWithScientist>,
}

/// Payload for creating a planet.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlanet {
    pub name: String,
    pub distance_from_earth: i64,
    pub nearest_star: String,
}

impl Validate for NewPlanet {
    fn validate(&self) -> Result<(), String> {
        check_text("name", &self.name)?;
        check_text("nearest_star", &self.nearest_star)
    }
}

/// Payload for updating a planet.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanetChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub distance_from_earth: Option<i64>,
    #[serde(default)]
    pub nearest_star: Option<String>,
}

impl Validate for PlanetChanges {
    fn validate(&self) -> Result<(), String> {
        check_optional_text("name", self.name.as_deref())?;
        check_optional_text("nearest_star", self.nearest_star.as_deref())
    }
}
