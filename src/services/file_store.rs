use bytes::BytesMut;
use futures::StreamExt;
use std::sync::Arc;
use tracing::debug;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{ByteStream, ObjectMetadata},
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::ObjectStore,
};

/// Writes uploaded content into a bucket through the object store client
#[derive(Clone)]
pub struct FileStore {
    store: Arc<dyn ObjectStore>,
}

impl FileStore {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Drain `content` and store it at `bucket/key` with the given metadata.
    ///
    /// Backend failures are returned as-is; nothing is retried.
    pub async fn save(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        metadata: Option<&ObjectMetadata>,
        mut content: ByteStream<'_>,
    ) -> StorageResult<()> {
        let mut buffer = BytesMut::new();
        while let Some(chunk) = content.next().await {
            let chunk = chunk.map_err(|e| StorageError::ContentRead {
                message: e.to_string(),
            })?;
            buffer.extend_from_slice(&chunk);
        }
        drop(content);

        let data = buffer.freeze();
        let no_metadata = ObjectMetadata::new();
        let metadata = metadata.unwrap_or(&no_metadata);

        debug!(
            bucket = %bucket,
            key = %key,
            bytes = data.len(),
            metadata_entries = metadata.len(),
            "Writing object"
        );

        self.store.put_object(bucket, key, metadata, data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::storage::{ApacheObjectStoreAdapter, PublicUrlStyle};
    use bytes::Bytes;
    use futures::stream;
    use object_store::memory::InMemory;

    fn file_store() -> (FileStore, Arc<ApacheObjectStoreAdapter>, BucketName) {
        let bucket = BucketName::new("bucket-name".to_string()).unwrap();
        let adapter = Arc::new(ApacheObjectStoreAdapter::new(
            Arc::new(InMemory::new()),
            bucket.clone(),
            PublicUrlStyle::Memory,
        ));
        (FileStore::new(adapter.clone()), adapter, bucket)
    }

    #[tokio::test]
    async fn test_save_writes_all_chunks_with_metadata() {
        let (file_store, adapter, bucket) = file_store();
        let key = ObjectKey::new("file.txt".to_string()).unwrap();

        let mut metadata = ObjectMetadata::new();
        metadata.insert("x-test", "1");

        let chunks = vec![
            Ok(Bytes::from_static(b"hel")),
            Ok(Bytes::from_static(b"lo")),
        ];
        file_store
            .save(&bucket, &key, Some(&metadata), stream::iter(chunks).boxed())
            .await
            .unwrap();

        let stored = adapter.get_object(&bucket, &key).await.unwrap();
        assert_eq!(stored.data, Bytes::from_static(b"hello"));
        assert_eq!(stored.metadata.get("x-test"), Some("1"));
    }

    #[tokio::test]
    async fn test_save_without_metadata() {
        let (file_store, adapter, bucket) = file_store();
        let key = ObjectKey::new("plain.bin".to_string()).unwrap();

        let content = stream::iter(vec![Ok(Bytes::from_static(b"raw"))]).boxed();
        file_store.save(&bucket, &key, None, content).await.unwrap();

        let stored = adapter.get_object(&bucket, &key).await.unwrap();
        assert!(stored.metadata.is_empty());
    }

    #[tokio::test]
    async fn test_stream_failure_skips_write() {
        let (file_store, adapter, bucket) = file_store();
        let key = ObjectKey::new("broken.bin".to_string()).unwrap();

        let chunks = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::other("connection reset")),
        ];
        let err = file_store
            .save(&bucket, &key, None, stream::iter(chunks).boxed())
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::ContentRead { .. }));
        assert!(matches!(
            adapter.get_object(&bucket, &key).await,
            Err(StorageError::ObjectNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_backend_error_is_propagated() {
        let (file_store, _adapter, _) = file_store();
        let other_bucket = BucketName::new("other-bucket".to_string()).unwrap();
        let key = ObjectKey::new("file.txt".to_string()).unwrap();

        let content = stream::iter(vec![Ok(Bytes::from_static(b"x"))]).boxed();
        let err = file_store
            .save(&other_bucket, &key, None, content)
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::BucketMismatch { .. }));
    }
}
