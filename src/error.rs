//! Error types for rangecopy.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur while validating or executing a range copy, the stable
//! [`ErrorCode`] used by front ends, and the [`Result`] type alias.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | Validation | [`Error::MissingArgument`], [`Error::NegativeValue`], [`Error::IsADirectory`] |
//! | Source | [`Error::SourceNotFound`] |
//! | Access | [`Error::PermissionDenied`] |
//! | Conflict | [`Error::DestinationExists`] |
//! | IO | [`Error::Io`] |

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for rangecopy operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```
/// use std::io;
/// use rangecopy::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    const NO_SPACE: Option<i32> = Some(28);
    #[cfg(windows)]
    const NO_SPACE: Option<i32> = Some(112);
    #[cfg(not(any(unix, windows)))]
    const NO_SPACE: Option<i32> = None;

    matches!((error.raw_os_error(), NO_SPACE), (Some(raw), Some(code)) if raw == code)
}

/// Stable, machine-readable classification of an [`Error`].
///
/// Front ends use this to pick exit codes and to tag JSON output; the
/// string forms never change between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A required argument was not supplied
    MissingArgument,
    /// An argument was supplied but is not acceptable
    InvalidInput,
    /// The source file does not exist
    SourceNotFound,
    /// The OS refused access to the source or destination
    PermissionDenied,
    /// The destination exists and the policy forbids touching it
    DestinationExists,
    /// The destination device is full
    NoSpace,
    /// Any other read, write, seek or open failure
    IoError,
}

impl ErrorCode {
    /// String form used in diagnostics and JSON output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingArgument => "missing_argument",
            Self::InvalidInput => "invalid_input",
            Self::SourceNotFound => "source_not_found",
            Self::PermissionDenied => "permission_denied",
            Self::DestinationExists => "destination_exists",
            Self::NoSpace => "no_space",
            Self::IoError => "io_error",
        }
    }

    /// Whether the error was caught before any file was opened.
    #[must_use]
    pub fn is_validation(self) -> bool {
        matches!(self, Self::MissingArgument | Self::InvalidInput)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during range copy operations.
///
/// Every variant that relates to a file carries its path, so the rendered
/// message always names the offending file.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required argument (`from` or `to`) was absent or empty
    #[error("Missing required argument: -{0}")]
    MissingArgument(&'static str),

    /// A numeric argument was negative
    #[error("Invalid value for -{name}: {value} (must not be negative)")]
    NegativeValue {
        /// Name of the argument
        name: &'static str,
        /// The rejected value
        value: i64,
    },

    /// Source path does not exist
    #[error("Source file {0} does not exist")]
    SourceNotFound(PathBuf),

    /// Source is a directory, not a regular file
    #[error("Source is a directory, not a file: {0}")]
    IsADirectory(PathBuf),

    /// The OS denied access to a file
    #[error("Permission denied: {path}: {source}")]
    PermissionDenied {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },

    /// Destination already exists and the policy is [`OnExisting::Error`](crate::OnExisting::Error)
    #[error("Destination file {0} already exists")]
    DestinationExists(PathBuf),

    /// IO error while opening, seeking, reading or writing a file
    #[error("IO error: {path}: {source}")]
    Io {
        /// File the failing operation was applied to
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
}

impl Error {
    /// Classify an IO error raised while operating on `path`.
    ///
    /// Permission failures become [`Error::PermissionDenied`], everything
    /// else [`Error::Io`]. Callers handle `NotFound` and `AlreadyExists`
    /// themselves since their meaning depends on which file failed.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                path: path.to_path_buf(),
                source,
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Stable code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingArgument(_) => ErrorCode::MissingArgument,
            Self::NegativeValue { .. } | Self::IsADirectory(_) => ErrorCode::InvalidInput,
            Self::SourceNotFound(_) => ErrorCode::SourceNotFound,
            Self::PermissionDenied { .. } => ErrorCode::PermissionDenied,
            Self::DestinationExists(_) => ErrorCode::DestinationExists,
            Self::Io { source, .. } if is_no_space_error(source) => ErrorCode::NoSpace,
            Self::Io { .. } => ErrorCode::IoError,
        }
    }

    /// Path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::SourceNotFound(path)
            | Self::IsADirectory(path)
            | Self::DestinationExists(path)
            | Self::PermissionDenied { path, .. }
            | Self::Io { path, .. } => Some(path),
            Self::MissingArgument(_) | Self::NegativeValue { .. } => None,
        }
    }
}
