//! Configuration options for range copies.
//!
//! This module provides [`RangeOptions`] for configuring copy behavior and
//! [`OnExisting`] for deciding what happens to a destination that is
//! already present.
//!
//! # Example
//!
//! ```
//! use rangecopy::{OnExisting, RangeOptions};
//!
//! let options = RangeOptions::default()
//!     .with_on_existing(OnExisting::Error)
//!     .with_buffer_size(4096)
//!     .without_fsync();
//! ```

/// Default cap on the copy buffer, in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 256;

/// Behavior when the destination file already exists.
///
/// # Default
///
/// The default is [`OnExisting::Append`]: the copied range is added to the
/// end of whatever the destination already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OnExisting {
    /// Append to the existing destination (default).
    #[default]
    Append,
    /// Fail with [`Error::DestinationExists`](crate::Error::DestinationExists).
    ///
    /// The check is made by exclusive creation, so a destination that
    /// appears between planning and copying is still detected.
    Error,
}

impl OnExisting {
    /// String form used in plan and JSON output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Error => "error",
        }
    }
}

/// Options for range copy operations.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `on_existing` | `Append` | Append to an existing destination |
/// | `buffer_size` | 256 | Upper bound of the copy buffer |
/// | `fsync` | `true` | Sync the destination after writing |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeOptions {
    /// Behavior when the destination already exists
    pub on_existing: OnExisting,

    /// Upper bound of the intermediate buffer (default: 256)
    ///
    /// The buffer actually allocated is `min(limit, buffer_size)`, and
    /// progress is reported once per read of at most this many bytes.
    pub buffer_size: usize,

    /// Whether to sync the destination to disk after writing (default: true)
    pub fsync: bool,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self {
            on_existing: OnExisting::Append,
            buffer_size: DEFAULT_BUFFER_SIZE,
            fsync: true,
            warn_handler: None,
        }
    }
}

impl RangeOptions {
    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Set the existing-destination policy
    #[must_use]
    pub fn with_on_existing(mut self, on_existing: OnExisting) -> Self {
        self.on_existing = on_existing;
        self
    }

    /// Set the buffer size cap
    ///
    /// A zero size would never make progress, so it is raised to 1 when
    /// the copy runs (with a warning).
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Disable fsync for faster (but less durable) copies
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Buffer size actually used for a copy of `limit` bytes.
    ///
    /// Never zero while `limit > 0`.
    pub(crate) fn effective_buffer_size(&self, limit: u64) -> usize {
        let cap = if self.buffer_size == 0 {
            self.warn("buffer size 0 is not usable, using 1");
            1
        } else {
            self.buffer_size
        };
        usize::try_from(limit).map_or(cap, |limit| limit.min(cap))
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }
}
