//! Startup configuration, passed explicitly into the application builder.

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
