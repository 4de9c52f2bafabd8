use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    domain::{
        errors::{RepositoryError, RepositoryResult},
        models::{UserProfile, sample_profiles},
        value_objects::UserId,
    },
    ports::repositories::ProfileRepository,
};

/// In-memory implementation of ProfileRepository for testing and development
#[derive(Clone)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<Vec<UserProfile>>>,
}

impl InMemoryProfileRepository {
    /// Repository pre-populated with the sample profiles
    pub fn new() -> Self {
        Self::with_profiles(sample_profiles())
    }

    /// Repository with no profiles at all
    pub fn empty() -> Self {
        Self::with_profiles(Vec::new())
    }

    pub fn with_profiles(profiles: Vec<UserProfile>) -> Self {
        Self {
            profiles: Arc::new(RwLock::new(profiles)),
        }
    }
}

impl Default for InMemoryProfileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn list(&self) -> RepositoryResult<Vec<UserProfile>> {
        Ok(self.profiles.read().await.clone())
    }

    async fn get(&self, id: &UserId) -> RepositoryResult<Option<UserProfile>> {
        let profiles = self.profiles.read().await;
        Ok(profiles.iter().find(|p| p.id() == *id).cloned())
    }

    async fn add(&self, profile: UserProfile) -> RepositoryResult<()> {
        let mut profiles = self.profiles.write().await;

        if profiles.iter().any(|p| p.id() == profile.id()) {
            return Err(RepositoryError::DuplicateProfile(profile.id()));
        }

        profiles.push(profile);
        Ok(())
    }

    async fn set_profile_image_link(
        &self,
        id: &UserId,
        url: &str,
    ) -> RepositoryResult<UserProfile> {
        let mut profiles = self.profiles.write().await;

        let profile = profiles
            .iter_mut()
            .find(|p| p.id() == *id)
            .ok_or(RepositoryError::ProfileNotFound(*id))?;

        profile.set_profile_image_link(url);
        Ok(profile.clone())
    }
}
