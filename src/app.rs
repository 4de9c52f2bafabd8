use std::sync::Arc;

use crate::{
    adapters::{
        inbound::http::AppState,
        outbound::{
            persistence::{InMemoryProfileRepository, SqlProfileRepository},
            storage::{ApacheObjectStoreAdapter, S3Config, create_s3_store},
        },
    },
    config::AwsSettings,
    domain::value_objects::BucketName,
    ports::{repositories::ProfileRepository, storage::ObjectStore},
    services::{ProfileServiceBuilder, ProfileServiceImpl},
};

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage_backend: StorageBackend,
    pub repository_backend: RepositoryBackend,
    /// Bucket that receives every uploaded image
    pub bucket: BucketName,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::InMemory,
            repository_backend: RepositoryBackend::InMemory,
            bucket: BucketName::default_bucket(),
        }
    }
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    /// AWS S3, or an S3-compatible server when `endpoint` is set
    S3 {
        region: String,
        access_key: Option<String>,
        secret_key: Option<String>,
        endpoint: Option<String>,
    },
}

/// Repository backend configuration
#[derive(Debug, Clone)]
pub enum RepositoryBackend {
    InMemory,
    Sqlite { database_url: String },
}

/// Application dependencies container
pub struct AppDependencies {
    pub object_store: Arc<dyn ObjectStore>,
    pub profile_repository: Arc<dyn ProfileRepository>,
    pub bucket: BucketName,
}

/// Application services container
pub struct AppServices {
    pub profile_service: ProfileServiceImpl,
}

impl AppServices {
    /// Router state backed by these services
    pub fn app_state(&self) -> AppState {
        AppState::new(Arc::new(self.profile_service.clone()))
    }
}

/// Application builder for dependency injection
pub struct AppBuilder {
    config: AppConfig,
}

impl AppBuilder {
    /// Create a new application builder
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Configure the application with custom settings
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure storage backend
    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.config.storage_backend = backend;
        self
    }

    /// Configure repository backend
    pub fn with_repository_backend(mut self, backend: RepositoryBackend) -> Self {
        self.config.repository_backend = backend;
        self
    }

    /// Configure the upload bucket
    pub fn with_bucket(mut self, bucket: BucketName) -> Self {
        self.config.bucket = bucket;
        self
    }

    /// Build the application dependencies
    pub async fn build_dependencies(self) -> Result<AppDependencies, AppError> {
        let object_store = self.create_object_store()?;
        let profile_repository = self.create_repository().await?;

        Ok(AppDependencies {
            object_store,
            profile_repository,
            bucket: self.config.bucket,
        })
    }

    /// Build the complete application with services
    pub async fn build(self) -> Result<AppServices, AppError> {
        let deps = self.build_dependencies().await?;

        let profile_service = ProfileServiceBuilder::new()
            .repository(deps.profile_repository)
            .object_store(deps.object_store)
            .bucket(deps.bucket)
            .build()
            .map_err(|message| AppError::ServiceInit {
                message: message.to_string(),
            })?;

        Ok(AppServices { profile_service })
    }

    /// Create the storage adapter based on configuration
    fn create_object_store(&self) -> Result<Arc<dyn ObjectStore>, AppError> {
        let bucket = self.config.bucket.clone();

        match &self.config.storage_backend {
            StorageBackend::InMemory => Ok(Arc::new(ApacheObjectStoreAdapter::in_memory(bucket))),
            StorageBackend::S3 {
                region,
                access_key,
                secret_key,
                endpoint,
            } => {
                let s3_config = S3Config {
                    bucket: bucket.as_str().to_string(),
                    region: region.clone(),
                    access_key: access_key.clone(),
                    secret_key: secret_key.clone(),
                    endpoint: endpoint.clone(),
                };

                tracing::info!(
                    bucket = %bucket,
                    region = %s3_config.region,
                    endpoint = ?s3_config.endpoint,
                    static_credentials = s3_config.static_credentials().is_some(),
                    "Configuring S3 object store"
                );

                let store = create_s3_store(&s3_config).map_err(|e| AppError::StorageInit {
                    message: format!("{:#}", e),
                })?;

                Ok(Arc::new(ApacheObjectStoreAdapter::new(
                    store,
                    bucket,
                    s3_config.url_style(),
                )))
            }
        }
    }

    /// Create the profile repository based on configuration
    async fn create_repository(&self) -> Result<Arc<dyn ProfileRepository>, AppError> {
        match &self.config.repository_backend {
            RepositoryBackend::InMemory => Ok(Arc::new(InMemoryProfileRepository::new())),
            RepositoryBackend::Sqlite { database_url } => {
                let repo_error = |e: sqlx::Error| AppError::RepositoryInit {
                    message: e.to_string(),
                };

                let repo = SqlProfileRepository::connect(database_url)
                    .await
                    .map_err(repo_error)?;
                repo.migrate().await.map_err(repo_error)?;
                repo.seed_sample_profiles().await.map_err(repo_error)?;

                Ok(Arc::new(repo))
            }
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },

    #[error("Repository initialization error: {message}")]
    RepositoryInit { message: String },

    #[error("Service initialization error: {message}")]
    ServiceInit { message: String },
}

/// Convenience functions for common configurations
///
/// Create an in-memory application for testing and development
pub async fn create_in_memory_app() -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(StorageBackend::InMemory)
        .with_repository_backend(RepositoryBackend::InMemory)
        .build()
        .await
}

/// Create an S3-backed application from resolved settings
pub async fn create_s3_app(
    settings: &AwsSettings,
    repository_backend: RepositoryBackend,
) -> Result<AppServices, AppError> {
    AppBuilder::new()
        .with_storage_backend(settings.storage_backend())
        .with_repository_backend(repository_backend)
        .with_bucket(settings.bucket.clone())
        .build()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::models::ALICE_ID, ports::services::ProfileService};

    #[tokio::test]
    async fn test_create_in_memory_app() {
        let app = create_in_memory_app().await.unwrap();

        let profiles = app.profile_service.list_profiles().await.unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(app.profile_service.bucket().as_str(), "profile-image-uploads");
    }

    #[tokio::test]
    async fn test_app_builder_uses_configured_bucket() {
        let bucket = BucketName::new("avatars".to_string()).unwrap();
        let app = AppBuilder::new()
            .with_storage_backend(StorageBackend::InMemory)
            .with_repository_backend(RepositoryBackend::InMemory)
            .with_bucket(bucket.clone())
            .build()
            .await
            .unwrap();

        assert_eq!(app.profile_service.bucket(), &bucket);
    }

    #[tokio::test]
    async fn test_sqlite_repository_is_migrated_and_seeded() {
        let deps = AppBuilder::new()
            .with_repository_backend(RepositoryBackend::Sqlite {
                database_url: "sqlite::memory:".to_string(),
            })
            .build_dependencies()
            .await
            .unwrap();

        let alice = deps
            .profile_repository
            .get(&ALICE_ID.into())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(alice.username(), "alice");
    }

    #[tokio::test]
    async fn test_s3_backend_builds_without_network() {
        let app = AppBuilder::new()
            .with_storage_backend(StorageBackend::S3 {
                region: "us-east-1".to_string(),
                access_key: Some("AKIDEXAMPLE".to_string()),
                secret_key: Some("secret".to_string()),
                endpoint: Some("http://localhost:9000".to_string()),
            })
            .build()
            .await;

        assert!(app.is_ok());
    }

    #[tokio::test]
    async fn test_bad_database_url_fails_repository_init() {
        let result = AppBuilder::new()
            .with_repository_backend(RepositoryBackend::Sqlite {
                database_url: "postgres://nope".to_string(),
            })
            .build()
            .await;

        assert!(matches!(result, Err(AppError::RepositoryInit { .. })));
    }
}
