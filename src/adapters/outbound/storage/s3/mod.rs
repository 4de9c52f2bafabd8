//! S3 backend construction for the object_store adapter
//!
//! Credentials are either a static key pair or whatever the ambient AWS
//! provider chain yields (web identity, container or instance metadata).

use anyhow::{Context, Result};
use object_store::{
    ObjectStore as ObjectStoreBackend,
    aws::{AmazonS3Builder, AmazonS3ConfigKey},
};
use std::sync::Arc;

use super::apache_object_store_adapter::PublicUrlStyle;

/// Configuration for S3 storage backend
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub endpoint: Option<String>,
}

impl S3Config {
    /// Static credentials are only used when both halves are present
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key, &self.secret_key) {
            (Some(key), Some(secret)) => Some((key.as_str(), secret.as_str())),
            _ => None,
        }
    }

    /// Public URL layout matching the configured endpoint
    pub fn url_style(&self) -> PublicUrlStyle {
        match &self.endpoint {
            Some(endpoint) => PublicUrlStyle::PathStyle {
                endpoint: endpoint.clone(),
            },
            None => PublicUrlStyle::VirtualHosted {
                region: self.region.clone(),
            },
        }
    }
}

/// Create an S3 store from configuration
pub fn create_s3_store(config: &S3Config) -> Result<Arc<dyn ObjectStoreBackend>> {
    let store = builder_from_vars(config, std::env::vars())
        .build()
        .context("Failed to build S3 store")?;

    Ok(Arc::new(store))
}

/// Keys that `S3Config` owns; the environment must not override them
fn is_explicit_key(key: &AmazonS3ConfigKey) -> bool {
    matches!(
        key,
        AmazonS3ConfigKey::AccessKeyId
            | AmazonS3ConfigKey::SecretAccessKey
            | AmazonS3ConfigKey::Token
            | AmazonS3ConfigKey::Bucket
            | AmazonS3ConfigKey::Region
            | AmazonS3ConfigKey::DefaultRegion
            | AmazonS3ConfigKey::Endpoint
    )
}

fn builder_from_vars(
    config: &S3Config,
    vars: impl IntoIterator<Item = (String, String)>,
) -> AmazonS3Builder {
    let mut builder = AmazonS3Builder::new();

    // Ambient provider settings such as AWS_WEB_IDENTITY_TOKEN_FILE
    for (name, value) in vars {
        if !name.starts_with("AWS_") {
            continue;
        }
        if let Ok(key) = name.to_ascii_lowercase().parse::<AmazonS3ConfigKey>() {
            if !is_explicit_key(&key) {
                builder = builder.with_config(key, value);
            }
        }
    }

    builder = builder
        .with_bucket_name(&config.bucket)
        .with_region(&config.region);

    if let Some((access_key, secret_key)) = config.static_credentials() {
        builder = builder
            .with_access_key_id(access_key)
            .with_secret_access_key(secret_key);
    }

    if let Some(endpoint) = &config.endpoint {
        builder = builder
            .with_endpoint(endpoint)
            .with_allow_http(endpoint.starts_with("http://"));
    }

    builder
}
