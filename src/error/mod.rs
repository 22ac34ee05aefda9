//! Error handling
//!
//! Defines error types for the file storage.

pub mod types;

pub use types::*;
