use crate::domain::value_objects::{BucketName, ObjectKey};

/// Errors raised by the object store client and the file store
#[derive(Debug, Clone)]
pub enum StorageError {
    /// The adapter is bound to a different bucket than the one requested
    BucketMismatch {
        configured: BucketName,
        requested: BucketName,
    },

    /// The upload stream failed before it was fully read
    ContentRead { message: String },

    /// Object not found
    ObjectNotFound { bucket: BucketName, key: ObjectKey },

    /// A public URL could not be built for the object
    InvalidObjectUrl { key: ObjectKey, reason: String },

    /// Validation error
    ValidationError { message: String },

    /// Infrastructure error with external source
    InfrastructureError {
        message: String,
        source: Option<String>, // Store error as string to allow Clone
    },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::BucketMismatch {
                configured,
                requested,
            } => {
                write!(
                    f,
                    "Bucket '{}' is not served by this store (configured: '{}')",
                    requested, configured
                )
            }
            StorageError::ContentRead { message } => {
                write!(f, "Failed to read upload content: {}", message)
            }
            StorageError::ObjectNotFound { bucket, key } => {
                write!(f, "Object not found: {}/{}", bucket, key)
            }
            StorageError::InvalidObjectUrl { key, reason } => {
                write!(f, "Cannot resolve URL for object '{}': {}", key, reason)
            }
            StorageError::ValidationError { message } => {
                write!(f, "Validation error: {}", message)
            }
            StorageError::InfrastructureError { message, .. } => {
                write!(f, "Infrastructure error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
