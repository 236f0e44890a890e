//! Service layer module.
//!
//! Contains the record-keeping logic for scientists, planets and missions:
//! payload validation, reference checks and not-found mapping.

pub mod mission;
pub mod planet;
pub mod scientist;

use crate::domain::EntityKind;

pub use mission::MissionService;
pub use planet::PlanetService;
pub use scientist::ScientistService;

/// Name of the counter tracking committed writes.
pub const RECORDS_METRIC: &str = "mission_control_records_total";

/// Kind of committed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    const fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Count a committed write.
pub(crate) fn record_change(kind: EntityKind, operation: Operation) {
    metrics::counter!(
        RECORDS_METRIC,
        "entity" => kind.label(),
        "operation" => operation.label()
    )
    .increment(1);
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use super::{Operation, RECORDS_METRIC, record_change};
    use crate::config::DatabaseConfig;
    use crate::domain::EntityKind;
    use crate::storage::{SqliteStorage, Storage};

    pub(crate) async fn memory_storage() -> Arc<dyn Storage> {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        };
        Arc::new(SqliteStorage::connect(&config).await.unwrap())
    }

    #[test]
    fn test_record_change_counts_by_entity_and_operation() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            record_change(EntityKind::Scientist, Operation::Create);
            record_change(EntityKind::Scientist, Operation::Create);
            record_change(EntityKind::Mission, Operation::Delete);
        });

        let rendered = handle.render();
        let sample = |entity: &str, operation: &str| {
            rendered
                .lines()
                .find(|line| {
                    line.starts_with(RECORDS_METRIC)
                        && line.contains(&format!("entity=\"{entity}\""))
                        && line.contains(&format!("operation=\"{operation}\""))
                })
                .map(str::to_string)
        };

        assert!(sample("scientist", "create").unwrap().ends_with(" 2"));
        assert!(sample("mission", "delete").unwrap().ends_with(" 1"));
        assert!(sample("planet", "create").is_none());
    }
}
