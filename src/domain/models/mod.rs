pub mod object;
pub mod profile;

pub use object::*;
pub use profile::*;
