//! Dry-run resolution of a range copy.
//!
//! [`plan_range`] opens the source exactly like the copier does and
//! resolves the clamped range, but only inspects the destination. Nothing
//! is created or written.

use crate::copy::open_source;
use crate::error::{Error, Result};
use crate::options::{OnExisting, RangeOptions};
use crate::request::CopyRequest;
use std::fs;
use std::io;

/// What a copy of the planned range would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlanAction {
    /// Destination exists and the range would be appended to it
    Append,
    /// Destination would be created
    Create,
    /// Offset is beyond the end of the source; nothing would happen
    SkipBeyondEnd,
    /// Destination exists and the policy forbids touching it
    Conflict,
}

impl PlanAction {
    /// String form used in plan output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Create => "create",
            Self::SkipBeyondEnd => "skip_beyond_end",
            Self::Conflict => "conflict",
        }
    }
}

/// Resolved range for a [`CopyRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangePlan {
    /// Size of the source file
    pub source_len: u64,
    /// Offset the copy would start at
    pub offset: u64,
    /// Bytes the copy would transfer (0 when skipped)
    pub limit: u64,
    /// Current size of the destination, if it exists
    pub destination_len: Option<u64>,
    /// What the copy would do
    pub action: PlanAction,
}

/// Resolve `request` against the file system without writing anything.
///
/// # Errors
///
/// Source-side errors are the same as for
/// [`copy_range`](crate::copy_range). A destination that exists but cannot
/// be inspected yields [`Error::PermissionDenied`] or [`Error::Io`]. A
/// conflict is reported as [`PlanAction::Conflict`], not as an error.
///
/// # Example
///
/// ```no_run
/// use rangecopy::{CopyRequest, PlanAction, RangeOptions, plan_range};
///
/// let request = CopyRequest::new("input.bin", "output.bin", 8, 100)?;
/// let plan = plan_range(&request, &RangeOptions::default())?;
/// if plan.action != PlanAction::SkipBeyondEnd {
///     println!("would copy {} bytes", plan.limit);
/// }
/// # Ok::<(), rangecopy::Error>(())
/// ```
pub fn plan_range(request: &CopyRequest, options: &RangeOptions) -> Result<RangePlan> {
    let (_source, source_len) = open_source(request.source())?;

    let destination_len = match fs::metadata(request.destination()) {
        Ok(meta) => Some(meta.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(Error::from_io(request.destination(), e)),
    };

    let (limit, action) = match request.clamped_limit(source_len) {
        None => (0, PlanAction::SkipBeyondEnd),
        Some(limit) => match (destination_len, options.on_existing) {
            (None, _) => (limit, PlanAction::Create),
            (Some(_), OnExisting::Append) => (limit, PlanAction::Append),
            (Some(_), OnExisting::Error) => (limit, PlanAction::Conflict),
        },
    };

    Ok(RangePlan {
        source_len,
        offset: request.offset(),
        limit,
        destination_len,
        action,
    })
}
