pub mod repositories;
pub mod services;
pub mod storage;

// Re-export all port traits for convenience
pub use repositories::ProfileRepository;
pub use services::ProfileService;
pub use storage::ObjectStore;
