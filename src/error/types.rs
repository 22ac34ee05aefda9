//! Error types
//!
//! Defines domain-specific error types for the storage core, the settings
//! loader and the process layer.

use std::fmt;
use std::io;

use crate::storage::Operation;

/// Why a logical path was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRejection {
    /// Contains a `..` component.
    ParentDir,
    /// Starts at a filesystem root or drive prefix.
    Absolute,
    /// Names the storage root itself, e.g. `.` or `./`.
    StorageRoot,
}

impl fmt::Display for PathRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRejection::ParentDir => write!(f, "path escapes the storage root"),
            PathRejection::Absolute => write!(f, "absolute paths are not allowed"),
            PathRejection::StorageRoot => write!(f, "path resolves to the storage root"),
        }
    }
}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    /// A required name or path was empty.
    Validation { op: Operation },
    /// The logical path was rejected before resolution finished.
    InvalidPath {
        op: Operation,
        path: String,
        reason: PathRejection,
    },
    /// The underlying filesystem call failed.
    Filesystem { op: Operation, source: io::Error },
}

impl StorageError {
    /// Operation that produced this error.
    pub fn op(&self) -> Operation {
        match self {
            StorageError::Validation { op }
            | StorageError::InvalidPath { op, .. }
            | StorageError::Filesystem { op, .. } => *op,
        }
    }

    /// Whether the error was raised before touching the filesystem.
    pub fn is_validation(&self) -> bool {
        !matches!(self, StorageError::Filesystem { .. })
    }

    /// Kind of the underlying filesystem failure, if any.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            StorageError::Filesystem { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Validation { op } => {
                write!(f, "error of the {}: the item's name is empty", op)
            }
            StorageError::InvalidPath { op, path, reason } => {
                write!(f, "error of the {}: {}: {:?}", op, reason, path)
            }
            StorageError::Filesystem { op, source } => write!(f, "error of the {}: {}", op, source),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Filesystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Settings loading errors
#[derive(Debug)]
pub enum SettingsError {
    /// Required environment variable is missing or empty.
    EnvironmentVariable(String),
    InvalidSocket { value: String, reason: String },
    Source(config::ConfigError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::EnvironmentVariable(key) => write!(
                f,
                "the {} var is empty or didn't set: check it and try again",
                key
            ),
            SettingsError::InvalidSocket { value, reason } => {
                write!(f, "invalid socket address {:?}: {}", value, reason)
            }
            SettingsError::Source(e) => write!(f, "configuration source error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Source(e) => Some(e),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for SettingsError {
    fn from(error: config::ConfigError) -> Self {
        SettingsError::Source(error)
    }
}

/// Process-level error that encompasses all startup failures
#[derive(Debug)]
pub enum AppError {
    Settings(SettingsError),
    Storage(StorageError),
    IoError(io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Settings(e) => write!(f, "Settings error: {}", e),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<SettingsError> for AppError {
    fn from(error: SettingsError) -> Self {
        AppError::Settings(error)
    }
}

impl From<StorageError> for AppError {
    fn from(error: StorageError) -> Self {
        AppError::Storage(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        AppError::IoError(error)
    }
}
