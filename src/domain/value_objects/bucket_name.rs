use std::str::FromStr;

use crate::domain::errors::ValidationError;

/// Bucket used when neither the environment nor the properties file names one
pub const DEFAULT_BUCKET_NAME: &str = "profile-image-uploads";

const MIN_LENGTH: usize = 3;
const MAX_LENGTH: usize = 63;

/// A validated bucket name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    /// Create a new BucketName with S3-compatible validation rules
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let len = value.len();
        if len < MIN_LENGTH {
            return Err(ValidationError::BucketNameTooShort {
                actual: len,
                min: MIN_LENGTH,
            });
        }
        if len > MAX_LENGTH {
            return Err(ValidationError::BucketNameTooLong {
                actual: len,
                max: MAX_LENGTH,
            });
        }

        if let Some(c) = value
            .chars()
            .find(|c| !c.is_ascii_lowercase() && !c.is_ascii_digit() && *c != '-')
        {
            return Err(ValidationError::BucketNameInvalidCharacter(c));
        }

        if value.starts_with('-') {
            return Err(ValidationError::BucketNameInvalidStart);
        }
        if value.ends_with('-') {
            return Err(ValidationError::BucketNameInvalidEnd);
        }

        if value.contains("--") {
            return Err(ValidationError::BucketNameConsecutiveHyphens);
        }

        Ok(Self(value))
    }

    /// The bucket profile images go to when nothing else is configured
    pub fn default_bucket() -> Self {
        Self(DEFAULT_BUCKET_NAME.to_string())
    }

    /// Get the bucket name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BucketName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bucket_names() {
        assert!("profile-images".parse::<BucketName>().is_ok());
        assert!("bucket123".parse::<BucketName>().is_ok());
        assert!("123bucket".parse::<BucketName>().is_ok());
        assert!(BucketName::new(DEFAULT_BUCKET_NAME.to_string()).is_ok());
    }

    #[test]
    fn test_invalid_bucket_names() {
        assert!("ab".parse::<BucketName>().is_err());
        assert!(BucketName::new("a".repeat(64)).is_err());
        assert_eq!(
            "-bucket".parse::<BucketName>(),
            Err(ValidationError::BucketNameInvalidStart)
        );
        assert_eq!(
            "bucket-".parse::<BucketName>(),
            Err(ValidationError::BucketNameInvalidEnd)
        );
        assert!("Bucket".parse::<BucketName>().is_err());
        assert!("my_bucket".parse::<BucketName>().is_err());
        assert!("my bucket".parse::<BucketName>().is_err());
        assert!("192.168.1.1".parse::<BucketName>().is_err());
        assert_eq!(
            "my--bucket".parse::<BucketName>(),
            Err(ValidationError::BucketNameConsecutiveHyphens)
        );
    }
}
