use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{
    errors::StorageResult,
    models::{ObjectMetadata, StoredObject},
    value_objects::{BucketName, ObjectKey},
};

/// Port for object storage operations
/// This abstracts the actual storage backend (S3, S3-compatible, in-memory)
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Store object data, replacing any object already at `bucket/key`
    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        metadata: &ObjectMetadata,
        data: Bytes,
    ) -> StorageResult<()>;

    /// Fully qualified public URL of an object
    async fn object_url(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<String>;

    /// Retrieve object data together with the metadata it was stored with
    async fn get_object(&self, bucket: &BucketName, key: &ObjectKey)
        -> StorageResult<StoredObject>;
}
