use crate::domain::errors::StorageError;

/// Convert object_store errors to domain storage errors
impl From<object_store::Error> for StorageError {
    fn from(err: object_store::Error) -> Self {
        match err {
            object_store::Error::NotFound { ref path, .. } => StorageError::InfrastructureError {
                message: format!("Object store has no object at '{}'", path),
                source: Some(err.to_string()),
            },
            object_store::Error::NotSupported { .. } => StorageError::InfrastructureError {
                message: "Operation not supported by the object store".to_string(),
                source: Some(err.to_string()),
            },
            object_store::Error::Unauthenticated { .. } => StorageError::InfrastructureError {
                message: "Object store rejected the credentials".to_string(),
                source: Some(err.to_string()),
            },
            object_store::Error::PermissionDenied { .. } => StorageError::InfrastructureError {
                message: "Object store denied the operation".to_string(),
                source: Some(err.to_string()),
            },
            _ => StorageError::InfrastructureError {
                message: format!("Object store operation failed: {}", err),
                source: Some(err.to_string()),
            },
        }
    }
}
