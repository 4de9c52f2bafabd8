mod bucket_name;
mod object_key;
mod user_id;

pub use bucket_name::{BucketName, DEFAULT_BUCKET_NAME};
pub use object_key::{DEFAULT_FILE_NAME, ObjectKey, normalize_file_name};
pub use user_id::UserId;
