mod file_store;
mod profile_service_impl;

pub use file_store::FileStore;
pub use profile_service_impl::{ProfileServiceBuilder, ProfileServiceImpl};
