//! File storage abstraction
//!
//! Pages, scripts and configuration are read whole into memory; partial
//! reads are never needed.

use alloc::vec::Vec;
use core::fmt;

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No file at the given path
    NotFound,
    /// Path is malformed or escapes the storage root
    InvalidPath,
    /// Underlying device or filesystem failure
    Io,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound => f.write_str("file not found"),
            StorageError::InvalidPath => f.write_str("invalid path"),
            StorageError::Io => f.write_str("storage I/O error"),
        }
    }
}

/// Read-only file storage
///
/// Paths are `/`-separated and relative to the storage root; a leading `/`
/// is allowed and means the same thing.
pub trait Storage {
    /// Read a whole file
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Check whether a file exists
    fn exists(&self, path: &str) -> bool {
        self.read(path).is_ok()
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        (**self).read(path)
    }

    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }
}
