use uuid::Uuid;

use crate::domain::errors::ValidationError;

/// Suffix used when an upload carries no usable filename
pub const DEFAULT_FILE_NAME: &str = "file";

const MAX_KEY_LENGTH: usize = 1024;

/// Hyphenated UUID plus the separating '-'
const GENERATED_PREFIX_LENGTH: usize = 37;

/// A validated object key (path) in the storage system
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Create a new ObjectKey with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyObjectKey);
        }

        if value.len() > MAX_KEY_LENGTH {
            return Err(ValidationError::ObjectKeyTooLong {
                actual: value.len(),
                max: MAX_KEY_LENGTH,
            });
        }

        if value.contains('\0') {
            return Err(ValidationError::InvalidObjectKeyCharacter('\0'));
        }

        if value.starts_with('/') {
            return Err(ValidationError::ObjectKeyStartsWithSlash);
        }

        if value.contains("//") {
            return Err(ValidationError::ObjectKeyContainsDoubleSlash);
        }

        Ok(Self(value))
    }

    /// Derive a fresh, unique key for an uploaded file.
    ///
    /// The key is a random UUID, a hyphen, and the original filename with every
    /// whitespace run collapsed into a single underscore. A missing or empty
    /// filename is replaced by [`DEFAULT_FILE_NAME`]. Slash runs are collapsed,
    /// NUL characters dropped and the name truncated so any filename yields a
    /// valid key.
    pub fn generate(original_filename: Option<&str>) -> Result<Self, ValidationError> {
        let suffix = match original_filename.map(key_suffix) {
            Some(suffix) if !suffix.is_empty() => suffix,
            _ => DEFAULT_FILE_NAME.to_string(),
        };

        Self::new(format!("{}-{}", Uuid::new_v4(), suffix))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Filename as it appears after the UUID prefix of a generated key
fn key_suffix(name: &str) -> String {
    let max_len = MAX_KEY_LENGTH - GENERATED_PREFIX_LENGTH;
    let mut suffix = String::with_capacity(name.len().min(max_len));

    for c in normalize_file_name(name).chars() {
        if c == '\0' || (c == '/' && suffix.ends_with('/')) {
            continue;
        }
        if suffix.len() + c.len_utf8() > max_len {
            break;
        }
        suffix.push(c);
    }

    suffix
}

/// ASCII whitespace: space, tab, line feed, vertical tab, form feed, carriage return
fn is_filename_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Replace each run of ASCII whitespace with a single underscore
pub fn normalize_file_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.chars() {
        if is_filename_whitespace(c) {
            if !in_whitespace {
                normalized.push('_');
            }
            in_whitespace = true;
        } else {
            normalized.push(c);
            in_whitespace = false;
        }
    }

    normalized
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
