use serde::{Deserialize, Serialize};

use crate::domain::{models::UserProfile, value_objects::UserId};

/// Message returned for every failed upload
pub const STORE_FAILURE_MESSAGE: &str = "failed to store file";

/// DTO for a user profile as listed by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDto {
    pub id: UserId,
    pub username: String,
    pub user_profile_image_link: Option<String>,
}

/// DTO for a successful upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponseDto {
    pub url: String,
}

/// DTO for error responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
    pub code: String,
}

impl ErrorResponseDto {
    pub fn store_failure(code: &str) -> Self {
        Self {
            error: STORE_FAILURE_MESSAGE.to_string(),
            code: code.to_string(),
        }
    }
}

impl From<&UserProfile> for UserProfileDto {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id(),
            username: profile.username().to_string(),
            user_profile_image_link: profile.profile_image_link().map(str::to_string),
        }
    }
}
