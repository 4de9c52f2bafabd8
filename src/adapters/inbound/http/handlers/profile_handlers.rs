use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartRejection},
};
use futures::{StreamExt, TryStreamExt};
use std::{io, str::FromStr};

use crate::{
    adapters::inbound::http::{
        dto::{UploadResponseDto, UserProfileDto},
        error::ApiError,
        router::AppState,
    },
    domain::{models::UploadImageRequest, value_objects::UserId},
};

/// Name of the multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// Handle profile listing
pub async fn list_users(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<UserProfileDto>>, ApiError> {
    let profiles = app_state.profile_service.list_profiles().await?;

    Ok(Json(profiles.iter().map(UserProfileDto::from).collect()))
}

/// Handle a profile image upload
///
/// The `file` part is streamed straight into the service; other parts are skipped.
pub async fn upload_profile_image(
    State(app_state): State<AppState>,
    Path(user_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponseDto>, ApiError> {
    // A malformed id cannot name any profile.
    let user_id = UserId::from_str(&user_id).map_err(|_| ApiError::NotFound)?;

    let mut multipart =
        multipart.map_err(|e| ApiError::invalid_upload(format!("Invalid multipart: {}", e)))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_upload(format!("Invalid multipart: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            tracing::debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        let request = UploadImageRequest {
            user_id,
            filename,
            content_type,
            content: field.map_err(io::Error::other).boxed(),
        };

        let url = app_state
            .profile_service
            .upload_profile_image(request)
            .await?;

        return Ok(Json(UploadResponseDto { url }));
    }

    Err(ApiError::invalid_upload("missing multipart field 'file'"))
}
