//! File system storage
//!
//! Resolves logical paths under the storage root and runs namespace,
//! directory and file operations against them.

pub mod filesystem;
pub mod operations;
pub mod validation;

pub use operations::{DEFAULT_BASE_PATH, Operation, Storage};
