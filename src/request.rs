//! Validated copy requests.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Default number of bytes to copy when no limit is given.
pub const DEFAULT_LIMIT: u64 = 4096;

/// A validated byte-range copy request.
///
/// Built only through [`CopyRequest::new`], which rejects empty paths and
/// negative numbers before any file is touched. Fields are read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    source: PathBuf,
    destination: PathBuf,
    offset: u64,
    limit: u64,
}

impl CopyRequest {
    /// Validate raw arguments into a request.
    ///
    /// `offset` and `limit` are accepted as signed values, as they arrive
    /// from the command line, and checked here.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingArgument`] if `source` or `destination` is empty
    /// - [`Error::NegativeValue`] if `offset` or `limit` is negative
    ///
    /// # Example
    ///
    /// ```
    /// use rangecopy::CopyRequest;
    ///
    /// let request = CopyRequest::new("in.bin", "out.bin", 2, 5)?;
    /// assert_eq!(request.offset(), 2);
    /// assert!(CopyRequest::new("", "out.bin", 0, 1).is_err());
    /// # Ok::<(), rangecopy::Error>(())
    /// ```
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        source: P,
        destination: Q,
        offset: i64,
        limit: i64,
    ) -> Result<Self> {
        let source = source.into();
        let destination = destination.into();

        if source.as_os_str().is_empty() {
            return Err(Error::MissingArgument("from"));
        }
        if destination.as_os_str().is_empty() {
            return Err(Error::MissingArgument("to"));
        }

        Ok(Self {
            source,
            destination,
            offset: non_negative("offset", offset)?,
            limit: non_negative("limit", limit)?,
        })
    }

    /// Source file path
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Destination file path
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Byte position in the source where copying begins
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Requested number of bytes, before clamping to the source size
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Bytes that would be copied from a source of `source_len` bytes.
    ///
    /// Returns `None` when the offset lies beyond the end of the source.
    #[must_use]
    pub fn clamped_limit(&self, source_len: u64) -> Option<u64> {
        source_len
            .checked_sub(self.offset)
            .map(|remaining| remaining.min(self.limit))
    }
}

fn non_negative(name: &'static str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::NegativeValue { name, value })
}
