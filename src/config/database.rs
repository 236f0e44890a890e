//! Database configuration.

use config::ConfigError;
use serde::Deserialize;

/// Database backend, derived from the connection URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    /// Embedded `SQLite` file or in-memory database.
    Sqlite,
}

impl DatabaseBackend {
    /// Detect the backend from a connection URL.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else {
            None
        }
    }
}

impl std::fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. `sqlite://app.db`.
    #[serde(default = "default_url")]
    pub url: String,

    /// Connection pool maximum size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a free pooled connection.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout: u64,

    /// Apply embedded schema migrations on startup.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// The backend selected by the configured URL.
    #[must_use]
    pub fn backend(&self) -> Option<DatabaseBackend> {
        DatabaseBackend::from_url(&self.url)
    }

    /// Validate the database configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is empty or names an unsupported backend,
    /// or if the pool would have no connections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::Message(
                "database.url cannot be empty".to_string(),
            ));
        }
        if self.backend().is_none() {
            return Err(ConfigError::Message(format!(
                "database.url has an unsupported scheme: {}",
                self.url
            )));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_url() -> String {
    "sqlite://app.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_acquire_timeout() -> u64 {
    5
}

const fn default_run_migrations() -> bool {
    true
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            acquire_timeout: default_acquire_timeout(),
            run_migrations: default_run_migrations(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_url() {
        assert_eq!(
            DatabaseBackend::from_url("sqlite://app.db"),
            Some(DatabaseBackend::Sqlite)
        );
        assert_eq!(
            DatabaseBackend::from_url("sqlite::memory:"),
            Some(DatabaseBackend::Sqlite)
        );
        assert_eq!(DatabaseBackend::from_url("postgres://localhost/db"), None);
        assert_eq!(DatabaseBackend::Sqlite.to_string(), "sqlite");
    }

    #[test]
    fn test_database_config_validation() {
        let config = DatabaseConfig::default();
        assert!(config.validate().is_ok());

        let config = DatabaseConfig {
            url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DatabaseConfig {
            url: "mysql://localhost/missions".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DatabaseConfig {
            max_connections: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
