//! Application state for Axum handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;
use crate::service::{MissionService, PlanetService, ScientistService};
use crate::storage::traits::Storage;

/// Shared application state.
///
/// The storage handle is passed explicitly to every service; there is no
/// process-wide database session.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Storage backend.
    pub storage: Arc<dyn Storage>,
    /// Scientist service.
    pub scientist_service: Arc<ScientistService>,
    /// Planet service.
    pub planet_service: Arc<PlanetService>,
    /// Mission service.
    pub mission_service: Arc<MissionService>,
    /// Prometheus handle, present when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: Arc<AppConfig>, storage: Arc<dyn Storage>) -> Self {
        let scientist_service = Arc::new(ScientistService::new(Arc::clone(&storage)));
        let planet_service = Arc::new(PlanetService::new(Arc::clone(&storage)));
        let mission_service = Arc::new(MissionService::new(Arc::clone(&storage)));

        Self {
            config,
            storage,
            scientist_service,
            planet_service,
            mission_service,
            metrics: None,
        }
    }

    /// Attach the handle used to render `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
