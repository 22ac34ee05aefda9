//! Storage operations
//!
//! Namespace, directory and file operations over a base directory. Every
//! failure is logged through the injected logger before it is returned.

use log::{Level, Log, Record};
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::StorageError;
use crate::storage::filesystem;
use crate::storage::validation::{is_present, resolve_path};

/// Base directory used when none is configured.
pub const DEFAULT_BASE_PATH: &str = ".data";

const LOG_TARGET: &str = "file_storage::storage";

/// Identifies the operation an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateNamespace,
    DeleteNamespace,
    CreateDir,
    DeleteDir,
    CreateFile,
    DeleteFile,
    GetFile,
    CopyFile,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreateNamespace => "storage.create-namespace",
            Operation::DeleteNamespace => "storage.delete-namespace",
            Operation::CreateDir => "storage.create-dir",
            Operation::DeleteDir => "storage.delete-dir",
            Operation::CreateFile => "storage.create-file",
            Operation::DeleteFile => "storage.delete-file",
            Operation::GetFile => "storage.get-file",
            Operation::CopyFile => "storage.copy-file",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filesystem-backed storage rooted at a fixed base directory.
///
/// Holds no mutable state; share it by reference or clone it freely. Two
/// callers touching the same path race exactly as the filesystem allows.
#[derive(Clone)]
pub struct Storage {
    log: Arc<dyn Log>,
    base: PathBuf,
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage").field("base", &self.base).finish()
    }
}

impl Storage {
    pub fn new(log: Arc<dyn Log>, base: impl Into<PathBuf>) -> Self {
        Self {
            log,
            base: base.into(),
        }
    }

    /// Directory every logical path is resolved against
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Creates a namespace directly under the base directory.
    pub fn create_namespace(&self, name: &str) -> Result<(), StorageError> {
        let op = Operation::CreateNamespace;
        let path = self.required_path(op, name)?;

        filesystem::create_directory(&path).map_err(|e| self.fs_error(op, e))
    }

    /// Deletes a namespace with all its contents.
    pub fn delete_namespace(&self, name: &str) -> Result<(), StorageError> {
        let op = Operation::DeleteNamespace;
        let path = self.required_path(op, name)?;

        filesystem::remove_directory(&path).map_err(|e| self.fs_error(op, e))
    }

    /// Creates a directory. The parent has to exist already.
    pub fn create_dir(&self, path: &str) -> Result<(), StorageError> {
        let op = Operation::CreateDir;
        let path = self.required_path(op, path)?;

        filesystem::create_directory(&path).map_err(|e| self.fs_error(op, e))
    }

    /// Deletes a directory with all its contents.
    pub fn delete_dir(&self, path: &str) -> Result<(), StorageError> {
        let op = Operation::DeleteDir;
        let path = self.required_path(op, path)?;

        filesystem::remove_directory(&path).map_err(|e| self.fs_error(op, e))
    }

    /// Writes `data` to the file at `path`, replacing any previous content.
    pub fn create_file(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let op = Operation::CreateFile;
        let path = self.resolve(op, path)?;

        let mut file = filesystem::open_for_replace(&path).map_err(|e| self.fs_error(op, e))?;
        file.write_all(data).map_err(|e| self.fs_error(op, e))
    }

    /// Removes the file at `path`. A missing file is a filesystem error.
    pub fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        let op = Operation::DeleteFile;
        let path = self.resolve(op, path)?;

        filesystem::remove_file(&path).map_err(|e| self.fs_error(op, e))
    }

    /// Returns the whole content of the file at `path`.
    pub fn get_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let op = Operation::GetFile;
        let path = self.resolve(op, path)?;

        let mut file = File::open(&path).map_err(|e| self.fs_error(op, e))?;
        filesystem::read_all(&mut file).map_err(|e| self.fs_error(op, e))
    }

    /// Copies `from` into `to`, creating or truncating `to`.
    ///
    /// The first failure aborts the copy. A destination that was already
    /// created is left in place.
    pub fn copy_file(&self, from: &str, to: &str) -> Result<(), StorageError> {
        let op = Operation::CopyFile;
        let from = self.resolve(op, from)?;
        let to = self.resolve(op, to)?;

        let mut source = File::open(&from).map_err(|e| self.fs_error(op, e))?;
        let mut destination =
            filesystem::open_for_replace(&to).map_err(|e| self.fs_error(op, e))?;

        let data = filesystem::read_all(&mut source).map_err(|e| self.fs_error(op, e))?;
        destination
            .write_all(&data)
            .map_err(|e| self.fs_error(op, e))
    }

    fn required_path(&self, op: Operation, logical: &str) -> Result<PathBuf, StorageError> {
        if !is_present(logical) {
            return Err(self.report(StorageError::Validation { op }));
        }
        self.resolve(op, logical)
    }

    fn resolve(&self, op: Operation, logical: &str) -> Result<PathBuf, StorageError> {
        resolve_path(&self.base, logical).map_err(|reason| {
            self.report(StorageError::InvalidPath {
                op,
                path: logical.to_string(),
                reason,
            })
        })
    }

    fn fs_error(&self, op: Operation, source: io::Error) -> StorageError {
        self.report(StorageError::Filesystem { op, source })
    }

    /// Logs `err` (warn before any filesystem call, error after) and hands it back.
    fn report(&self, err: StorageError) -> StorageError {
        let level = if err.is_validation() {
            Level::Warn
        } else {
            Level::Error
        };

        self.log.log(
            &Record::builder()
                .level(level)
                .target(LOG_TARGET)
                .module_path_static(Some(module_path!()))
                .file_static(Some(file!()))
                .args(format_args!("{}", err))
                .build(),
        );

        err
    }
}
