//! Scientist entity and payloads.

use serde::{Deserialize, Serialize};

use super::mission::MissionWithPlanet;
use super::{Validate, check_optional_text, check_text};

/// A scientist row. Also the summary view used by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Scientist {
    /// Generated identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Field of study.
    pub field_of_study: String,
}

/// A scientist together with the missions they lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScientistDetail {
    #[serde(flatten)]
    pub scientist: Scientist,
    /// Missions led by this scientist, each with its destination planet.
    pub missions: Vec<MissionWithPlanet>,
}

/// Payload for creating a scientist.
#[derive(Debug, Clone, Deserialize)]
pub struct NewScientist {
    pub name: String,
    pub field_of_study: String,
}

impl Validate for NewScientist {
    fn validate(&self) -> Result<(), String> {
        check_text("name", &self.name)?;
        check_text("field_of_study", &self.field_of_study)
    }
}

/// Payload for updating a scientist. Absent fields are left unchanged and
/// unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScientistChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
}

impl Validate for ScientistChanges {
    fn validate(&self) -> Result<(), String> {
        check_optional_text("name", self.name.as_deref())?;
        check_optional_text("field_of_study", self.field_of_study.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scientist_validation() {
        let payload = NewScientist {
            name: "Evan Horizon".to_string(),
            field_of_study: "Astronavigation".to_string(),
        };
        assert!(payload.validate().is_ok());

        let payload = NewScientist {
            name: String::new(),
            field_of_study: "Astronavigation".to_string(),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_changes_ignore_unknown_keys() {
        let changes: ScientistChanges =
            serde_json::from_str(r#"{"name": "X", "id": 99, "is_admin": true}"#).unwrap();
        assert_eq!(changes.name.as_deref(), Some("X"));
        assert!(changes.field_of_study.is_none());
        assert!(changes.validate().is_ok());
    }

    #[test]
    fn test_detail_flattens_scientist() {
        let detail = ScientistDetail {
            scientist: Scientist {
                id: 1,
                name: "Evan Horizon".to_string(),
                field_of_study: "Astronavigation".to_string(),
            },
            missions: Vec::new(),
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["field_of_study"], "Astronavigation");
        assert!(value["missions"].as_array().unwrap().is_empty());
    }
}
