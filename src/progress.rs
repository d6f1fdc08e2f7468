//! Progress reporting helpers.
//!
//! The copier reports `(bytes_read, limit)` after every read. The line
//! format is always available; the indicatif bar needs the `progress`
//! feature.

/// Render the progress line printed after each read.
///
/// ```
/// assert_eq!(rangecopy::format_progress_line(256, 300), "Read 256 bytes out of 300");
/// ```
#[must_use]
pub fn format_progress_line(bytes_read: u64, limit: u64) -> String {
    format!("Read {bytes_read} bytes out of {limit}")
}

/// Create a byte progress bar for a copy of `total` bytes
#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
#[must_use]
pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}
