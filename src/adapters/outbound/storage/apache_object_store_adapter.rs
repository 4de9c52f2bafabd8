use async_trait::async_trait;
use bytes::Bytes;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStore as ApacheObjectStore, PutOptions,
    PutPayload, memory::InMemory, path::Path as ObjectPath,
};
use std::sync::Arc;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{ObjectMetadata, StoredObject},
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::ObjectStore,
};

/// How public object URLs are formed for a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicUrlStyle {
    /// `https://{bucket}.s3.{region}.amazonaws.com/{key}`
    VirtualHosted { region: String },
    /// `{endpoint}/{bucket}/{key}`, used by S3-compatible servers
    PathStyle { endpoint: String },
    /// `memory://{bucket}/{key}`
    Memory,
}

impl PublicUrlStyle {
    pub fn object_url(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<String> {
        let encoded_key = encode_key(key);

        match self {
            PublicUrlStyle::VirtualHosted { region } => {
                if region.is_empty() || !region.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                    return Err(StorageError::InvalidObjectUrl {
                        key: key.clone(),
                        reason: format!("invalid region '{}'", region),
                    });
                }
                Ok(format!(
                    "https://{}.s3.{}.amazonaws.com/{}",
                    bucket, region, encoded_key
                ))
            }
            PublicUrlStyle::PathStyle { endpoint } => {
                if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                    return Err(StorageError::InvalidObjectUrl {
                        key: key.clone(),
                        reason: format!("endpoint '{}' is not an http(s) URL", endpoint),
                    });
                }
                Ok(format!(
                    "{}/{}/{}",
                    endpoint.trim_end_matches('/'),
                    bucket,
                    encoded_key
                ))
            }
            PublicUrlStyle::Memory => Ok(format!("memory://{}/{}", bucket, encoded_key)),
        }
    }
}

/// Location the backend stores a key under
///
/// object_store drops empty segments and percent-encodes characters it does
/// not allow in a path part, so the stored location can differ from the key.
fn object_path(key: &ObjectKey) -> ObjectPath {
    ObjectPath::from(key.as_str())
}

/// Percent-encode each segment of the stored location, keeping the separators
fn encode_key(key: &ObjectKey) -> String {
    object_path(key)
        .parts()
        .map(|part| urlencoding::encode(part.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Map a header-style metadata name onto an object_store attribute
fn attribute_for(name: &str) -> Attribute {
    match name.to_ascii_lowercase().as_str() {
        "content-type" => Attribute::ContentType,
        "content-disposition" => Attribute::ContentDisposition,
        "content-encoding" => Attribute::ContentEncoding,
        "content-language" => Attribute::ContentLanguage,
        "cache-control" => Attribute::CacheControl,
        _ => Attribute::Metadata(name.to_string().into()),
    }
}

fn header_name_for(attribute: &Attribute) -> Option<String> {
    let name = match attribute {
        Attribute::ContentType => "Content-Type",
        Attribute::ContentDisposition => "Content-Disposition",
        Attribute::ContentEncoding => "Content-Encoding",
        Attribute::ContentLanguage => "Content-Language",
        Attribute::CacheControl => "Cache-Control",
        Attribute::Metadata(name) => return Some(name.to_string()),
        _ => return None,
    };
    Some(name.to_string())
}

fn to_attributes(metadata: &ObjectMetadata) -> Attributes {
    let mut attributes = Attributes::new();
    for (name, value) in metadata.iter() {
        attributes.insert(attribute_for(name), AttributeValue::from(value.to_string()));
    }
    attributes
}

fn from_attributes(attributes: &Attributes) -> ObjectMetadata {
    attributes
        .iter()
        .filter_map(|(attribute, value)| {
            let value: &str = value.as_ref();
            header_name_for(attribute).map(|name| (name, value.to_string()))
        })
        .collect()
}

/// Adapter that implements our ObjectStore trait using Apache object_store.
///
/// An object_store backend is bound to a single bucket, so the adapter only
/// serves the bucket it was built for.
pub struct ApacheObjectStoreAdapter {
    inner: Arc<dyn ApacheObjectStore>,
    bucket: BucketName,
    url_style: PublicUrlStyle,
}

impl ApacheObjectStoreAdapter {
    pub fn new(
        store: Arc<dyn ApacheObjectStore>,
        bucket: BucketName,
        url_style: PublicUrlStyle,
    ) -> Self {
        Self {
            inner: store,
            bucket,
            url_style,
        }
    }

    /// Adapter over a fresh in-memory backend
    pub fn in_memory(bucket: BucketName) -> Self {
        Self::new(Arc::new(InMemory::new()), bucket, PublicUrlStyle::Memory)
    }

    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    fn ensure_bucket(&self, bucket: &BucketName) -> StorageResult<()> {
        if *bucket != self.bucket {
            return Err(StorageError::BucketMismatch {
                configured: self.bucket.clone(),
                requested: bucket.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for ApacheObjectStoreAdapter {
    async fn put_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
        metadata: &ObjectMetadata,
        data: Bytes,
    ) -> StorageResult<()> {
        self.ensure_bucket(bucket)?;

        let path = object_path(key);
        let options = PutOptions {
            attributes: to_attributes(metadata),
            ..Default::default()
        };

        self.inner
            .put_opts(&path, PutPayload::from(data), options)
            .await?;

        Ok(())
    }

    async fn object_url(&self, bucket: &BucketName, key: &ObjectKey) -> StorageResult<String> {
        self.ensure_bucket(bucket)?;
        self.url_style.object_url(bucket, key)
    }

    async fn get_object(
        &self,
        bucket: &BucketName,
        key: &ObjectKey,
    ) -> StorageResult<StoredObject> {
        self.ensure_bucket(bucket)?;

        let path = object_path(key);
        let result = self.inner.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => StorageError::ObjectNotFound {
                bucket: bucket.clone(),
                key: key.clone(),
            },
            other => other.into(),
        })?;

        let metadata = from_attributes(&result.attributes);
        let data = result.bytes().await?;

        Ok(StoredObject {
            bucket: bucket.clone(),
            key: key.clone(),
            metadata,
            data,
        })
    }
}
