use async_trait::async_trait;

use crate::domain::{
    errors::ProfileResult,
    models::{UploadImageRequest, UserProfile},
    value_objects::UserId,
};

/// Port for profile service operations
/// This trait defines the business logic behind the profile endpoints
#[async_trait]
pub trait ProfileService: Send + Sync + 'static {
    /// List every known profile
    async fn list_profiles(&self) -> ProfileResult<Vec<UserProfile>>;

    /// Get a single profile
    async fn get_profile(&self, id: &UserId) -> ProfileResult<Option<UserProfile>>;

    /// Store an image and link it to the user's profile, returning its URL
    async fn upload_profile_image(&self, request: UploadImageRequest<'_>) -> ProfileResult<String>;
}
