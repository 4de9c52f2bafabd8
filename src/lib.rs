pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core business entities and value objects
pub use domain::{
    BucketName,
    DomainValidationError,
    // Models
    ObjectMetadata,
    // Value objects
    ObjectKey,
    // Errors
    ProfileError,
    RepositoryError,
    StorageError,
    UploadImageRequest,
    UserId,
    UserProfile,
};

// Port types - interfaces for external systems
pub use ports::{ObjectStore, ProfileRepository, ProfileService};

// Service implementations - business logic
pub use services::{FileStore, ProfileServiceBuilder, ProfileServiceImpl};

// Application factory and configuration
pub use app::{
    AppBuilder, AppConfig, AppDependencies, AppError, AppServices, RepositoryBackend,
    StorageBackend, create_in_memory_app, create_s3_app,
};
pub use config::{AwsSettings, Properties};

// Adapter types - infrastructure implementations
pub use adapters::inbound::http::{AppState, create_router};
pub use adapters::outbound::{
    persistence::{InMemoryProfileRepository, SqlProfileRepository},
    storage::{ApacheObjectStoreAdapter, PublicUrlStyle},
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        ApacheObjectStoreAdapter, AppBuilder, AppServices, AppState, BucketName,
        InMemoryProfileRepository, ObjectKey, ObjectStore, ProfileRepository, ProfileService,
        ProfileServiceImpl, UserId, UserProfile, create_in_memory_app, create_router,
    };
}
