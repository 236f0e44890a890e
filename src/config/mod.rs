//! Configuration management module.
//!
//! Supports loading configuration from:
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `MISSION_CONTROL__<SECTION>__<KEY>` pattern
//! - The `DB_URI` environment variable, which overrides `database.url`

mod database;
mod server;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use database::{DatabaseBackend, DatabaseConfig};
pub use server::ServerConfig;

/// Environment variable overriding the database connection URL.
pub const DB_URI_ENV: &str = "DB_URI";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{MISSION_CONTROL_PROFILE}.toml` (defaults to `development`)
    /// 3. Environment variables with `MISSION_CONTROL__` prefix
    /// 4. `DB_URI`
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let profile =
            std::env::var("MISSION_CONTROL_PROFILE").unwrap_or_else(|_| "development".to_string());

        Self::load_with("config", &profile, std::env::var(DB_URI_ENV).ok())
    }

    /// Load configuration from `{config_dir}/default.toml` and
    /// `{config_dir}/{profile}.toml`, then environment variables, then `db_uri`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_with(
        config_dir: &str,
        profile: &str,
        db_uri: Option<String>,
    ) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(&format!("{config_dir}/default")).required(false))
            .add_source(File::with_name(&format!("{config_dir}/{profile}")).required(false))
            // MISSION_CONTROL__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::with_prefix("MISSION_CONTROL")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", db_uri)?
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        self.database.validate()?;

        match self.observability.log_format.as_str() {
            "text" | "json" => Ok(()),
            other => Err(ConfigError::Message(format!(
                "observability.log_format must be \"text\" or \"json\", got {other:?}"
            ))),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Enable Prometheus metrics endpoint.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_metrics_enabled() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, name: &str, contents: &str) {
        std::fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5555);
        assert_eq!(config.database.url, "sqlite://app.db");
        assert_eq!(config.database.backend(), Some(DatabaseBackend::Sqlite));
        assert_eq!(config.observability.log_format, "text");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.observability.log_format = "yaml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_with_layers_files() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            &dir,
            "default.toml",
            "[server]\nport = 6000\n\n[database]\nurl = \"sqlite://from-file.db\"\n",
        );
        write_config(&dir, "staging.toml", "[server]\nport = 7000\n");
        let config_dir = dir.path().to_str().unwrap();

        let config = AppConfig::load_with(config_dir, "staging", None).unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.database.url, "sqlite://from-file.db");
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_db_uri_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            &dir,
            "default.toml",
            "[database]\nurl = \"sqlite://from-file.db\"\nmax_connections = 2\n",
        );
        let config_dir = dir.path().to_str().unwrap();

        let config = AppConfig::load_with(
            config_dir,
            "development",
            Some("sqlite://override.db".to_string()),
        )
        .unwrap();
        assert_eq!(config.database.url, "sqlite://override.db");
        assert_eq!(config.database.max_connections, 2);
    }

    #[test]
    fn test_load_with_rejects_invalid_db_uri() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().to_str().unwrap();

        let result = AppConfig::load_with(
            config_dir,
            "development",
            Some("postgres://localhost/missions".to_string()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_with_missing_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().to_str().unwrap();

        let config = AppConfig::load_with(config_dir, "development", None).unwrap();
        assert_eq!(config.server.port, 5555);
        assert!(config.database.run_migrations);
        assert!(config.observability.metrics_enabled);
    }
}
