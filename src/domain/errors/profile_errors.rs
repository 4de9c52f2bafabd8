use thiserror::Error;

use crate::domain::{errors::StorageError, value_objects::UserId};

/// Errors raised by profile repositories
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Profile already exists: {0}")]
    DuplicateProfile(UserId),

    #[error("Profile not found: {0}")]
    ProfileNotFound(UserId),

    #[error("Stored profile record is invalid: {message}")]
    InvalidRecord { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

/// Failures of the profile service, one variant per step of the upload path
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Failed to store profile image: {0}")]
    StorageWriteFailed(StorageError),

    #[error("Stored profile image but could not resolve its URL: {0}")]
    UrlResolutionFailed(StorageError),

    #[error("Stored profile image but could not link it to the profile: {0}")]
    ProfileUpdateFailed(RepositoryError),

    #[error("Profile repository failure: {0}")]
    Repository(#[from] RepositoryError),
}

impl ProfileError {
    /// Stable machine-readable code for the failure
    pub fn code(&self) -> &'static str {
        match self {
            ProfileError::UserNotFound(_) => "user_not_found",
            ProfileError::StorageWriteFailed(_) => "storage_write_failed",
            ProfileError::UrlResolutionFailed(_) => "url_resolution_failed",
            ProfileError::ProfileUpdateFailed(_) => "profile_update_failed",
            ProfileError::Repository(_) => "repository_failure",
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
pub type ProfileResult<T> = Result<T, ProfileError>;
