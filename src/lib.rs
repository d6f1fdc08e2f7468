//! # rangecopy
//!
//! Copy a bounded byte range from one file to another.
//!
//! ## Core Features
//!
//! - **Bounded copy**: starts at an offset and copies at most `limit` bytes,
//!   clamped to what the source actually holds
//! - **Append semantics**: the range is appended to the destination, which
//!   is created if absent
//! - **Explicit conflict policy**: optionally refuse an existing destination
//!   ([`OnExisting::Error`]), checked by exclusive creation
//! - **Progress reporting**: a callback after every buffer-sized read
//! - **Dry run**: [`plan_range`] resolves the range without writing
//! - **Validated requests**: [`CopyRequest`] rejects missing paths and
//!   negative numbers before any file is opened
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use rangecopy::RangeCopyBuilder;
//!
//! // Copy bytes 2..7 of input.bin to the end of output.bin
//! let stats = RangeCopyBuilder::new("input.bin", "output.bin")
//!     .offset(2)
//!     .limit(5)
//!     .run()?;
//! println!("Copied {} of {} bytes", stats.bytes_copied, stats.limit);
//! # Ok::<(), rangecopy::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use rangecopy::{CopyRequest, OnExisting, RangeOptions, copy_range_with_progress};
//!
//! let request = CopyRequest::new("input.bin", "output.bin", 0, 4096)?;
//! let options = RangeOptions::default()
//!     .with_on_existing(OnExisting::Error)
//!     .without_fsync();
//!
//! copy_range_with_progress(&request, &options, |read, limit| {
//!     println!("Read {read} bytes out of {limit}");
//! })?;
//! # Ok::<(), rangecopy::Error>(())
//! ```
//!
//! ## Edge Cases
//!
//! - An offset past the end of the source is not an error: nothing is
//!   copied and the destination is neither created nor modified.
//! - An offset exactly at the end of the source copies zero bytes but still
//!   creates the destination.
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | Byte progress bar with indicatif |
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`RangeOptions`] and [`RangePlan`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod copy;
mod error;
mod options;
mod plan;
mod progress;
mod request;

pub use builder::RangeCopyBuilder;
pub use copy::{RangeCopyStats, copy_range, copy_range_with_progress};
pub use error::{Error, ErrorCode, Result, is_no_space_error};
pub use options::{DEFAULT_BUFFER_SIZE, OnExisting, RangeOptions};
pub use plan::{PlanAction, RangePlan, plan_range};
pub use progress::format_progress_line;
pub use request::{CopyRequest, DEFAULT_LIMIT};

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::create_progress_bar;
