use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::{
    domain::{
        errors::{ProfileError, ProfileResult, StorageError},
        models::{ObjectMetadata, UploadImageRequest, UserProfile},
        value_objects::{BucketName, ObjectKey, UserId},
    },
    ports::{repositories::ProfileRepository, services::ProfileService, storage::ObjectStore},
    services::FileStore,
};

/// Implementation of ProfileService, including the profile image upload path
#[derive(Clone)]
pub struct ProfileServiceImpl {
    repository: Arc<dyn ProfileRepository>,
    file_store: FileStore,
    object_store: Arc<dyn ObjectStore>,
    bucket: BucketName,
}

impl ProfileServiceImpl {
    /// Create a new ProfileServiceImpl writing images into `bucket`
    pub fn new(
        repository: Arc<dyn ProfileRepository>,
        object_store: Arc<dyn ObjectStore>,
        bucket: BucketName,
    ) -> Self {
        Self {
            repository,
            file_store: FileStore::new(object_store.clone()),
            object_store,
            bucket,
        }
    }

    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }
}

#[async_trait]
impl ProfileService for ProfileServiceImpl {
    async fn list_profiles(&self) -> ProfileResult<Vec<UserProfile>> {
        Ok(self.repository.list().await?)
    }

    async fn get_profile(&self, id: &UserId) -> ProfileResult<Option<UserProfile>> {
        Ok(self.repository.get(id).await?)
    }

    async fn upload_profile_image(&self, request: UploadImageRequest<'_>) -> ProfileResult<String> {
        let UploadImageRequest {
            user_id,
            filename,
            content_type,
            content,
        } = request;

        let profile = self
            .repository
            .get(&user_id)
            .await?
            .ok_or(ProfileError::UserNotFound(user_id))?;

        let key = ObjectKey::generate(filename.as_deref()).map_err(|e| {
            ProfileError::StorageWriteFailed(StorageError::ValidationError {
                message: e.to_string(),
            })
        })?;
        let metadata = ObjectMetadata::with_content_type(content_type.as_deref());

        self.file_store
            .save(&self.bucket, &key, Some(&metadata), content)
            .await
            .map_err(|e| {
                error!(user_id = %user_id, bucket = %self.bucket, key = %key, error = %e, "Profile image write failed");
                ProfileError::StorageWriteFailed(e)
            })?;

        // From here on a failure leaves the object stored but not linked to any profile.
        let url = self
            .object_store
            .object_url(&self.bucket, &key)
            .await
            .map_err(|e| {
                warn!(user_id = %user_id, bucket = %self.bucket, key = %key, error = %e, "Stored image has no resolvable URL; object left unlinked");
                ProfileError::UrlResolutionFailed(e)
            })?;

        self.repository
            .set_profile_image_link(&user_id, &url)
            .await
            .map_err(|e| {
                warn!(user_id = %user_id, bucket = %self.bucket, key = %key, error = %e, "Profile update failed; object left unlinked");
                ProfileError::ProfileUpdateFailed(e)
            })?;

        info!(
            user_id = %user_id,
            username = profile.username(),
            key = %key,
            url = %url,
            "Profile image uploaded"
        );

        Ok(url)
    }
}

/// Builder for ProfileServiceImpl
#[derive(Default)]
pub struct ProfileServiceBuilder {
    repository: Option<Arc<dyn ProfileRepository>>,
    object_store: Option<Arc<dyn ObjectStore>>,
    bucket: Option<BucketName>,
}

impl ProfileServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository(mut self, repository: Arc<dyn ProfileRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn object_store(mut self, object_store: Arc<dyn ObjectStore>) -> Self {
        self.object_store = Some(object_store);
        self
    }

    pub fn bucket(mut self, bucket: BucketName) -> Self {
        self.bucket = Some(bucket);
        self
    }

    pub fn build(self) -> Result<ProfileServiceImpl, &'static str> {
        let repository = self.repository.ok_or("Repository is required")?;
        let object_store = self.object_store.ok_or("Object store is required")?;
        let bucket = self.bucket.ok_or("Bucket is required")?;

        Ok(ProfileServiceImpl::new(repository, object_store, bucket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::persistence::InMemoryProfileRepository;

    #[test]
    fn test_builder_requires_every_dependency() {
        let result = ProfileServiceBuilder::new()
            .repository(Arc::new(InMemoryProfileRepository::new()))
            .bucket(BucketName::default_bucket())
            .build();

        assert_eq!(result.err(), Some("Object store is required"));
    }
}
