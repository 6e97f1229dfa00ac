//! Error types for the easyzip crate

use std::path::{Path, PathBuf};

/// Result type for archive operations
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Error type for archive operations
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// I/O error during archive operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A path could not be turned into its absolute, slash-separated form
    #[error("Failed to resolve path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    /// The source of an operation does not exist
    #[error("{} does not exist", path.display())]
    NotFound { path: PathBuf },

    /// A directory was expected
    #[error("{} is not a directory", path.display())]
    NotDirectory { path: PathBuf },

    /// The destination exists and overwriting was not requested
    #[error("{} already exists, skipping", path.display())]
    AlreadyExists { path: PathBuf },

    /// The archive is missing or is not a valid ZIP container
    #[error("Failed to open zip archive {}: {reason}", path.display())]
    ArchiveOpen { path: PathBuf, reason: String },

    /// An entry listed in the archive index could not be read
    #[error("Failed to read entry {index} of zip archive: {reason}")]
    ArchiveRead { index: usize, reason: String },

    /// The ZIP writer rejected an entry or could not be finalized
    #[error("Failed to write zip archive: {reason}")]
    ArchiveWrite { reason: String },

    /// An entry name is absolute or escapes the extraction root
    #[error("Refusing to extract entry {name:?}: it escapes the destination directory")]
    InvalidEntryName { name: String },

    /// Unknown compression method name
    #[error("Unsupported compression method: {name}")]
    UnsupportedCompression { name: String },
}

impl ArchiveError {
    /// Create a new path resolution error
    pub fn invalid_path(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new not-a-directory error
    pub fn not_directory(path: impl AsRef<Path>) -> Self {
        Self::NotDirectory {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new destination collision error
    pub fn already_exists(path: impl AsRef<Path>) -> Self {
        Self::AlreadyExists {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new archive open error
    pub fn archive_open(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::ArchiveOpen {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a new archive read error
    pub fn archive_read(index: usize, reason: impl Into<String>) -> Self {
        Self::ArchiveRead {
            index,
            reason: reason.into(),
        }
    }

    /// Create a new archive write error
    pub fn archive_write(reason: impl Into<String>) -> Self {
        Self::ArchiveWrite {
            reason: reason.into(),
        }
    }

    /// Create a new invalid entry name error
    pub fn invalid_entry_name(name: impl Into<String>) -> Self {
        Self::InvalidEntryName { name: name.into() }
    }

    /// Create a new unsupported compression error
    pub fn unsupported_compression(name: impl Into<String>) -> Self {
        Self::UnsupportedCompression { name: name.into() }
    }
}
