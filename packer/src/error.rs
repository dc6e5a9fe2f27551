//! Error types for the packing and publishing pipeline.
//!
//! Validation errors (`InvalidFileMap`, `InvalidJson`, `InvalidProjectName`,
//! `UnsafePath`) are raised before any staging-directory mutation other than
//! its own creation, so a validation failure never produces a partial
//! archive. Filesystem failures surface as `Io` with no retry or
//! transient-error classification.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while packing a file map into an archive.
#[derive(Debug, Error)]
pub enum PackError {
    /// The file map input is not a string-to-string mapping.
    #[error("invalid file map: {reason}")]
    InvalidFileMap {
        /// Description of the malformed entry, naming the offending key.
        reason: String,
    },

    /// The file map text could not be parsed as JSON.
    #[error("invalid file map JSON: {source}")]
    InvalidJson {
        /// The underlying JSON parse error.
        #[from]
        source: serde_json::Error,
    },

    /// The project name is empty, contains a path separator, or contains
    /// `..`.
    #[error("invalid project name \"{name}\": {reason}")]
    InvalidProjectName {
        /// The rejected name.
        name: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// A file-map key is absolute, traverses upward, or escapes the
    /// staging root after resolution.
    #[error("unsafe path \"{path}\": {reason}")]
    UnsafePath {
        /// The offending path as supplied by the caller.
        path: String,
        /// Description of the violated constraint.
        reason: String,
    },

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for PackError {
    fn from(error: zip::result::ZipError) -> Self {
        match error {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::Io(std::io::Error::other(other)),
        }
    }
}

/// Result type alias using [`PackError`].
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while publishing an archive.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The path does not exist or is not a regular file.
    #[error("file not found or not a file: {path}")]
    FileNotFound {
        /// The path that failed the existence check.
        path: Utf8PathBuf,
    },

    /// The path could not be represented as a URL.
    #[error("path cannot be represented as a URL: {path}")]
    UnrepresentablePath {
        /// The path that defeated URL conversion.
        path: Utf8PathBuf,
    },

    /// An I/O operation failed while resolving the path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
