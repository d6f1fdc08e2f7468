//! Builder API for ergonomic range copies.
//!
//! The builder collects raw arguments, validates them into a
//! [`CopyRequest`] and runs the copier in one call.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use rangecopy::RangeCopyBuilder;
//!
//! let stats = RangeCopyBuilder::new("input.bin", "output.bin")
//!     .offset(2)
//!     .limit(5)
//!     .run()?;
//! println!("Copied {} bytes", stats.bytes_copied);
//! # Ok::<(), rangecopy::Error>(())
//! ```
//!
//! ## With Progress
//!
//! ```no_run
//! use rangecopy::{RangeCopyBuilder, format_progress_line};
//!
//! RangeCopyBuilder::new("input.bin", "output.bin")
//!     .limit(1 << 20)
//!     .fail_if_exists()
//!     .run_with_progress(|read, limit| println!("{}", format_progress_line(read, limit)))?;
//! # Ok::<(), rangecopy::Error>(())
//! ```

use crate::copy::{RangeCopyStats, copy_range_with_progress};
use crate::error::Result;
use crate::options::{OnExisting, RangeOptions};
use crate::plan::{RangePlan, plan_range};
use crate::request::{CopyRequest, DEFAULT_LIMIT};
use std::path::{Path, PathBuf};

/// A builder for configuring and executing a range copy.
///
/// Offsets and limits are kept as given and validated when the builder
/// runs, so a negative value surfaces as
/// [`Error::NegativeValue`](crate::Error::NegativeValue) from
/// [`run`](Self::run).
#[derive(Debug, Clone)]
pub struct RangeCopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    offset: i64,
    limit: i64,
    options: RangeOptions,
}

impl RangeCopyBuilder {
    /// Create a builder copying from `src` to `dst`.
    ///
    /// Starts at offset 0 with a limit of 4096 bytes and default options.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            offset: 0,
            limit: DEFAULT_LIMIT as i64,
            options: RangeOptions::default(),
        }
    }

    /// Byte position in the source where copying begins.
    #[must_use]
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    /// Maximum number of bytes to copy.
    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Append to an existing destination (default behavior).
    #[must_use]
    pub fn append_existing(mut self) -> Self {
        self.options = self.options.with_on_existing(OnExisting::Append);
        self
    }

    /// Fail if the destination already exists.
    #[must_use]
    pub fn fail_if_exists(mut self) -> Self {
        self.options = self.options.with_on_existing(OnExisting::Error);
        self
    }

    /// Cap the copy buffer at `size` bytes.
    #[must_use]
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.options = self.options.with_buffer_size(size);
        self
    }

    /// Skip fsync of the destination.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Set a custom warning handler.
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Replace all options at once.
    #[must_use]
    pub fn options(mut self, options: RangeOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the collected arguments into a request.
    ///
    /// # Errors
    ///
    /// See [`CopyRequest::new`].
    pub fn build(&self) -> Result<CopyRequest> {
        CopyRequest::new(&self.src, &self.dst, self.offset, self.limit)
    }

    /// Resolve the range without copying.
    ///
    /// # Errors
    ///
    /// See [`plan_range`].
    pub fn plan(self) -> Result<RangePlan> {
        let request = self.build()?;
        plan_range(&request, &self.options)
    }

    /// Run the copy.
    ///
    /// # Errors
    ///
    /// Validation errors from [`CopyRequest::new`], then any error from
    /// [`copy_range`](crate::copy_range).
    pub fn run(self) -> Result<RangeCopyStats> {
        self.run_with_progress(|_, _| {})
    }

    /// Run the copy, reporting `(bytes_read, limit)` after each read.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn run_with_progress<F>(self, on_progress: F) -> Result<RangeCopyStats>
    where
        F: FnMut(u64, u64),
    {
        let request = self.build()?;
        copy_range_with_progress(&request, &self.options, on_progress)
    }
}
