use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;

use super::dto::ErrorResponseDto;
use crate::domain::errors::ProfileError;

/// Errors surfaced by the HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// The addressed profile does not exist (or cannot exist)
    NotFound,
    /// The multipart request carried no usable file
    InvalidUpload(String),
    Profile(ProfileError),
}

impl ApiError {
    pub fn invalid_upload(message: impl Into<String>) -> Self {
        ApiError::InvalidUpload(message.into())
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::UserNotFound(_) => ApiError::NotFound,
            other => ApiError::Profile(other),
        }
    }
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        match self {
            ProfileError::UserNotFound(_) => StatusCode::NOT_FOUND.into_response(),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponseDto::store_failure(other.code())),
            )
                .into_response(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::InvalidUpload(message) => {
                tracing::warn!(reason = %message, "Rejected profile image upload");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponseDto::store_failure("invalid_upload")),
                )
                    .into_response()
            }
            ApiError::Profile(err) => err.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{errors::StorageError, value_objects::UserId};

    #[test]
    fn test_unknown_user_maps_to_not_found() {
        let response = ApiError::from(ProfileError::UserNotFound(UserId::generate())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_failures_map_to_internal_error() {
        let err = ProfileError::StorageWriteFailed(StorageError::ContentRead {
            message: "reset".to_string(),
        });
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::invalid_upload("no file").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
