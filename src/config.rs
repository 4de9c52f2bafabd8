//! Startup configuration: the optional properties file and the AWS
//! settings resolved from environment variables on top of it.

use serde::Deserialize;
use std::{fs, path::Path};

use crate::{
    app::{AppError, StorageBackend},
    domain::value_objects::{BucketName, DEFAULT_BUCKET_NAME},
};

/// Properties file read when no other path is given
pub const DEFAULT_PROPERTIES_PATH: &str = "config/application.toml";

pub const DEFAULT_REGION: &str = "us-east-1";

pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_BUCKET_NAME: &str = "AWS_BUCKET_NAME";
pub const ENV_ENDPOINT: &str = "AWS_ENDPOINT";

/// Application properties, loaded from TOML
///
/// ```toml
/// [aws]
/// region = "eu-west-1"
/// endpoint = "http://localhost:9000"
///
/// [aws.bucket]
/// name = "profile-image-uploads"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Properties {
    #[serde(default)]
    aws: AwsProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct AwsProperties {
    region: Option<String>,
    endpoint: Option<String>,
    #[serde(default)]
    bucket: BucketProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct BucketProperties {
    name: Option<String>,
}

impl Properties {
    /// Load properties from `path`; a missing file yields empty properties
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No properties file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| AppError::Configuration {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content).map_err(|e| AppError::Configuration {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Look up a dotted property name such as `aws.bucket.name`
    pub fn get(&self, name: &str) -> Option<&str> {
        let value = match name {
            "aws.region" => &self.aws.region,
            "aws.endpoint" => &self.aws.endpoint,
            "aws.bucket.name" => &self.aws.bucket.name,
            _ => return None,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Object storage settings after applying env > property > default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    pub region: String,
    pub bucket: BucketName,
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

impl AwsSettings {
    /// Resolve settings from an environment lookup and the loaded properties.
    ///
    /// Static credentials are kept only when both the key id and the secret are
    /// set; otherwise both are dropped and the ambient provider chain applies.
    pub fn resolve<F>(env: F, properties: &Properties) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| env(name).filter(|v| !v.is_empty());

        let region = var(ENV_REGION)
            .or_else(|| properties.get("aws.region").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let bucket_name = var(ENV_BUCKET_NAME)
            .or_else(|| properties.get("aws.bucket.name").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_BUCKET_NAME.to_string());
        let bucket = BucketName::new(bucket_name).map_err(|e| AppError::Configuration {
            message: format!("Invalid bucket name: {}", e),
        })?;

        let endpoint =
            var(ENV_ENDPOINT).or_else(|| properties.get("aws.endpoint").map(str::to_string));

        let (access_key, secret_key) = match (var(ENV_ACCESS_KEY_ID), var(ENV_SECRET_ACCESS_KEY)) {
            (Some(key), Some(secret)) => (Some(key), Some(secret)),
            _ => (None, None),
        };

        Ok(Self {
            region,
            bucket,
            endpoint,
            access_key,
            secret_key,
        })
    }

    /// Resolve against the process environment
    pub fn from_env(properties: &Properties) -> Result<Self, AppError> {
        Self::resolve(|name| std::env::var(name).ok(), properties)
    }

    pub fn has_static_credentials(&self) -> bool {
        self.access_key.is_some() && self.secret_key.is_some()
    }

    pub fn storage_backend(&self) -> StorageBackend {
        StorageBackend::S3 {
            region: self.region.clone(),
            access_key: self.access_key.clone(),
            secret_key: self.secret_key.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}
