//! Bounded byte-range copy.
//!
//! The copier opens the source, clamps the requested range to the bytes
//! actually available, seeks, and streams the range into the destination
//! through a small buffer, reporting progress after every read.
//!
//! Both file handles are owned by the call and closed on drop, on success
//! and on every error path.

use crate::error::{Error, Result};
use crate::options::{OnExisting, RangeOptions};
use crate::request::CopyRequest;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::{Duration, Instant};

/// Statistics from a range copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeCopyStats {
    /// Size of the source file when it was opened
    pub source_len: u64,
    /// Requested limit after clamping to the bytes past the offset
    pub limit: u64,
    /// Bytes written to the destination
    pub bytes_copied: u64,
    /// Number of successful reads (one progress report each)
    pub reads: u64,
    /// The offset was past the end of the source; nothing was opened for writing
    pub beyond_end: bool,
    /// Wall-clock duration of the operation
    pub duration: Duration,
}

/// Copy the requested byte range from source to destination.
///
/// Equivalent to [`copy_range_with_progress`] with a callback that ignores
/// progress.
///
/// # Errors
///
/// See [`copy_range_with_progress`].
///
/// # Example
///
/// ```no_run
/// use rangecopy::{CopyRequest, RangeOptions, copy_range};
///
/// let request = CopyRequest::new("input.bin", "output.bin", 2, 5)?;
/// let stats = copy_range(&request, &RangeOptions::default())?;
/// println!("Copied {} bytes", stats.bytes_copied);
/// # Ok::<(), rangecopy::Error>(())
/// ```
pub fn copy_range(request: &CopyRequest, options: &RangeOptions) -> Result<RangeCopyStats> {
    copy_range_with_progress(request, options, |_, _| {})
}

/// Copy the requested byte range, calling `on_progress(bytes_read, limit)`
/// after each read has been written out.
///
/// `limit` is the clamped limit, so the last call always reports
/// `bytes_read == limit` unless the source shrank while being copied.
///
/// If the offset lies beyond the end of the source the call succeeds
/// without opening (or creating) the destination.
///
/// # Errors
///
/// - [`Error::SourceNotFound`] if the source does not exist
/// - [`Error::IsADirectory`] if the source is a directory
/// - [`Error::PermissionDenied`] if either file cannot be accessed
/// - [`Error::DestinationExists`] if the destination exists and the policy
///   is [`OnExisting::Error`]
/// - [`Error::Io`] for any other open, seek, read, write or sync failure
pub fn copy_range_with_progress<F>(
    request: &CopyRequest,
    options: &RangeOptions,
    mut on_progress: F,
) -> Result<RangeCopyStats>
where
    F: FnMut(u64, u64),
{
    let start = Instant::now();
    let (mut source, source_len) = open_source(request.source())?;

    let Some(limit) = request.clamped_limit(source_len) else {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            offset = request.offset(),
            source_len,
            "offset beyond end of source, nothing to copy"
        );
        return Ok(RangeCopyStats {
            source_len,
            beyond_end: true,
            duration: start.elapsed(),
            ..RangeCopyStats::default()
        });
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        source = %request.source().display(),
        destination = %request.destination().display(),
        offset = request.offset(),
        requested = request.limit(),
        limit,
        "copying range"
    );

    let mut destination = open_destination(request.destination(), options.on_existing)?;

    source
        .seek(SeekFrom::Start(request.offset()))
        .map_err(|e| Error::from_io(request.source(), e))?;

    let (bytes_copied, reads) = if limit == 0 {
        (0, 0)
    } else {
        copy_bounded(
            &mut source,
            &mut destination,
            limit,
            options.effective_buffer_size(limit),
            request,
            &mut on_progress,
        )?
    };

    if options.fsync {
        destination
            .sync_all()
            .map_err(|e| Error::from_io(request.destination(), e))?;
    }

    Ok(RangeCopyStats {
        source_len,
        limit,
        bytes_copied,
        reads,
        beyond_end: false,
        duration: start.elapsed(),
    })
}

/// Open the source read-only and return it with its size.
pub(crate) fn open_source(path: &Path) -> Result<(File, u64)> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::SourceNotFound(path.to_path_buf()),
        _ => Error::from_io(path, e),
    })?;

    let meta = file.metadata().map_err(|e| Error::from_io(path, e))?;
    if meta.is_dir() {
        return Err(Error::IsADirectory(path.to_path_buf()));
    }

    Ok((file, meta.len()))
}

/// Open the destination for appending, creating it if needed.
fn open_destination(path: &Path, on_existing: OnExisting) -> Result<File> {
    let mut open = OpenOptions::new();
    open.append(true);
    match on_existing {
        OnExisting::Append => open.create(true),
        OnExisting::Error => open.create_new(true),
    };

    open.open(path).map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists if on_existing == OnExisting::Error => {
            Error::DestinationExists(path.to_path_buf())
        }
        _ => Error::from_io(path, e),
    })
}

/// Stream at most `limit` bytes from `reader` to `writer`.
///
/// Each read of `n` bytes is written in full before the next read. Returns
/// `(bytes_copied, reads)`.
fn copy_bounded<R, W, F>(
    reader: R,
    writer: &mut W,
    limit: u64,
    buffer_size: usize,
    request: &CopyRequest,
    on_progress: &mut F,
) -> Result<(u64, u64)>
where
    R: Read,
    W: Write,
    F: FnMut(u64, u64),
{
    let mut reader = reader.take(limit);
    let mut buf = vec![0u8; buffer_size];
    let mut copied: u64 = 0;
    let mut reads: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::from_io(request.source(), e)),
        };

        writer
            .write_all(&buf[..n])
            .map_err(|e| Error::from_io(request.destination(), e))?;

        copied += n as u64;
        reads += 1;

        #[cfg(feature = "tracing")]
        tracing::trace!(read = n, copied, limit, "chunk copied");

        on_progress(copied, limit);
    }

    Ok((copied, reads))
}
