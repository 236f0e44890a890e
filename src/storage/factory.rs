//! Storage backend factory.
//!
//! Creates the appropriate storage backend based on configuration.

use std::sync::Arc;

use crate::config::{DatabaseBackend, DatabaseConfig};
use crate::error::AppError;
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::Storage;

/// Create a storage backend based on configuration.
///
/// # Errors
///
/// Returns an error if the URL names no supported backend or the backend
/// cannot be initialized.
pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>, AppError> {
    match config.backend() {
        Some(DatabaseBackend::Sqlite) => {
            let storage = SqliteStorage::connect(config).await?;

            // Verify storage is healthy
            storage.health_check().await?;

            Ok(Arc::new(storage))
        }
        None => Err(AppError::Internal(format!(
            "unsupported database url: {}",
            config.url
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_sqlite_file_storage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            ..Default::default()
        };

        let storage = create_storage(&config).await.unwrap();
        assert_eq!(storage.backend_name(), "sqlite");
        assert!(path.exists());
        storage.close().await;
    }

    #[tokio::test]
    async fn test_create_unsupported_storage() {
        let config = DatabaseConfig {
            url: "postgres://localhost/missions".to_string(),
            ..Default::default()
        };

        let result = create_storage(&config).await;
        assert!(result.is_err());
    }
}
