//! Domain models for Mission Control.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create payload for inserts
//! - A `Deserialize` changes payload (all `Option` fields) for patches
//! - Serialized views that expand related entities

pub mod mission;
pub mod planet;
pub mod scientist;

use serde::{Deserialize, Serialize};

pub use mission::{
    Mission, MissionChanges, MissionDetail, MissionWithPlanet, MissionWithScientist, NewMission,
};
pub use planet::{NewPlanet, Planet, PlanetChanges, PlanetDetail};
pub use scientist::{NewScientist, Scientist, ScientistChanges, ScientistDetail};

/// Kind of persisted entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A scientist who leads missions.
    Scientist,
    /// A planet that missions travel to.
    Planet,
    /// A mission linking one scientist to one planet.
    Mission,
}

impl EntityKind {
    /// Lowercase label used for metrics and log fields.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scientist => "scientist",
            Self::Planet => "planet",
            Self::Mission => "mission",
        }
    }

    /// The entity served under a collection path segment, e.g. `planets`.
    #[must_use]
    pub fn from_collection(segment: &str) -> Option<Self> {
        match segment {
            "scientists" => Some(Self::Scientist),
            "planets" => Some(Self::Planet),
            "missions" => Some(Self::Mission),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scientist => write!(f, "Scientist"),
            Self::Planet => write!(f, "Planet"),
            Self::Mission => write!(f, "Mission"),
        }
    }
}

/// Write payloads that check their own field values.
pub trait Validate {
    /// Validate the payload.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    fn validate(&self) -> Result<(), String>;
}

/// Maximum length of any text attribute.
pub const MAX_TEXT_LEN: usize = 255;

/// Check a required text attribute.
pub(crate) fn check_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(format!("{field} cannot exceed {MAX_TEXT_LEN} characters"));
    }
    Ok(())
}

/// Check a text attribute that is only present when it changes.
pub(crate) fn check_optional_text(field: &str, value: Option<&str>) -> Result<(), String> {
    value.map_or(Ok(()), |v| check_text(field, v))
}
