//! Filesystem-backed storage of namespaces, directories and files.

pub mod app;
pub mod config;
pub mod error;
pub mod storage;
pub mod utils;

pub use error::{AppError, SettingsError, StorageError};
pub use storage::{Operation, Storage};
