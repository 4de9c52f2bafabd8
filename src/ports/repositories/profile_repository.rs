use async_trait::async_trait;

use crate::domain::{errors::RepositoryResult, models::UserProfile, value_objects::UserId};

/// Repository owning user profile records
#[async_trait]
pub trait ProfileRepository: Send + Sync + 'static {
    /// All profiles in insertion order
    async fn list(&self) -> RepositoryResult<Vec<UserProfile>>;

    /// Look up a profile; `None` when no profile has this id
    async fn get(&self, id: &UserId) -> RepositoryResult<Option<UserProfile>>;

    /// Insert a new profile, rejecting an id that is already taken
    async fn add(&self, profile: UserProfile) -> RepositoryResult<()>;

    /// Replace the image link of a single profile and return the updated record
    async fn set_profile_image_link(
        &self,
        id: &UserId,
        url: &str,
    ) -> RepositoryResult<UserProfile>;
}
