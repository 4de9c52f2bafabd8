#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use futures::{StreamExt, stream};
use profile_image_server::{
    adapters::outbound::storage::ApacheObjectStoreAdapter,
    domain::{
        errors::{StorageError, StorageResult},
        models::{ByteStream, ObjectMetadata, StoredObject},
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::ObjectStore,
};
use std::sync::Mutex;

/// A write observed by [`RecordingStore`]
#[derive(Debug, Clone)]
pub struct RecordedPut {
    pub bucket: BucketName,
    pub key: ObjectKey,
    pub metadata: ObjectMetadata,
    pub data: Bytes,
}

/// In-memory object store that records every write and can be told to fail
pub struct RecordingStore {
    inner: ApacheObjectStoreAdapter,
    puts: Mutex<Vec<RecordedPut>>,
    fail_writes: bool,
    fail_urls: bool,
}

impl RecordingStore {
    pub fn new(bucket: BucketName) -> Self {
        Self {
            inner: ApacheObjectStoreAdapter::in_memory(bucket),
            puts: Mutex::new(Vec::new()),
            fail_writes: false,
            fail_urls: false,
        }
    }

    pub fn failing_writes(bucket: BucketName) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(bucket)
        }
    }

    pub fn failing_urls(bucket: BucketName) -> Self {
        Self {
            fail_urls: true,
            ..Self::new(bucket)
        }
    }

    pub fn puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        metadata: &ObjectMetadata,
        data: Bytes,
    ) -> StorageResult<()> {
        self.puts.lock().unwrap().push(RecordedPut {
            bucket: bucket.clone(),
            key: key.clone(),
            metadata: metadata.clone(),
            data: data.clone(),
        });

        if self.fail_writes {
            return Err(StorageError::InfrastructureError {
                message: "bucket unavailable".to_string(),
                source: None,
            });
        }
        self.inner.put_object(bucket, key, metadata, data).await
    }

    async fn object_url(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<String> {
        if self.fail_urls {
            return Err(StorageError::InvalidObjectUrl {
                key: key.clone(),
                reason: "no public endpoint".to_string(),
            });
        }
        self.inner.object_url(bucket, key).await
    }

    async fn get_object(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<StoredObject> {
        self.inner.get_object(bucket, key).await
    }
}

/// Single-chunk upload body
pub fn content(data: &'static [u8]) -> ByteStream<'static> {
    stream::iter(vec![Ok(Bytes::from_static(data))]).boxed()
}
