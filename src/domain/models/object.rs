use bytes::Bytes;
use futures::stream::BoxStream;
use std::collections::BTreeMap;

use crate::domain::value_objects::{BucketName, ObjectKey, UserId};

/// Header name under which the upload's MIME type travels
pub const CONTENT_TYPE: &str = "Content-Type";

/// Streamed upload body, read to exhaustion by the file store
pub type ByteStream<'a> = BoxStream<'a, std::io::Result<Bytes>>;

/// Header-style metadata attached to a stored object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    entries: BTreeMap<String, String>,
}

impl ObjectMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata carrying only the content type, or nothing when it is absent
    pub fn with_content_type(content_type: Option<&str>) -> Self {
        let mut metadata = Self::new();
        if let Some(content_type) = content_type {
            metadata.insert(CONTENT_TYPE, content_type);
        }
        metadata
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.get(CONTENT_TYPE)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ObjectMetadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (k, v) in iter {
            metadata.insert(k, v);
        }
        metadata
    }
}

/// An object as read back from a bucket
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bucket: BucketName,
    pub key: ObjectKey,
    pub metadata: ObjectMetadata,
    pub data: Bytes,
}

/// Request to attach a new profile image to a user
pub struct UploadImageRequest<'a> {
    pub user_id: UserId,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub content: ByteStream<'a>,
}

impl std::fmt::Debug for UploadImageRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadImageRequest")
            .field("user_id", &self.user_id)
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_entry_only_when_supplied() {
        let with = ObjectMetadata::with_content_type(Some("image/jpeg"));
        assert_eq!(with.len(), 1);
        assert_eq!(with.get("content-type"), Some("image/jpeg"));

        let without = ObjectMetadata::with_content_type(None);
        assert!(without.is_empty());
        assert_eq!(without.content_type(), None);
    }
}
