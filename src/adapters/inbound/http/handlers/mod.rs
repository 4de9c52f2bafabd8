pub mod profile_handlers;

pub use profile_handlers::*;
