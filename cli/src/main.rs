//! rangecp - Range Copy
//!
//! Copy a byte range from one file to the end of another, powered by
//! rangecopy.

use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use rangecopy::{
    CopyRequest, DEFAULT_BUFFER_SIZE, DEFAULT_LIMIT, Error as RangeError, ErrorCode, OnExisting,
    RangeCopyStats, RangeOptions, RangePlan, copy_range, copy_range_with_progress,
    create_progress_bar, format_progress_line, plan_range,
};
use serde_json::{Value, json};
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// rangecp - Copy a byte range from one file to another
///
/// Skips OFFSET bytes of the source, then appends at most LIMIT bytes to
/// the destination (created if absent). Flags may be written Go-style
/// with a single dash (-from, -offset=2) or with two dashes.
///
/// Usage:
///   rangecp -from SOURCE -to DEST [-offset N] [-limit N]
#[derive(Parser, Debug)]
#[command(name = "rangecp", version, about, long_about = None)]
struct Args {
    /// Path to the source file
    #[arg(long, value_name = "PATH")]
    from: Option<PathBuf>,

    /// Path to the destination file
    #[arg(long, value_name = "PATH")]
    to: Option<PathBuf>,

    /// Number of bytes to skip in the source
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i64,

    /// Number of bytes to copy
    #[arg(long, default_value_t = DEFAULT_LIMIT as i64, allow_negative_numbers = true)]
    limit: i64,

    /// What to do when the destination already exists
    #[arg(long, value_enum, default_value = "append")]
    on_existing: ExistingPolicy,

    /// Upper bound of the copy buffer in bytes
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,

    /// Progress reporting style
    #[arg(long, value_enum, default_value = "lines")]
    progress: ProgressMode,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Print the resolved range without copying
    #[arg(short = 'n', long = "plan", alias = "dry-run")]
    plan: bool,

    /// Do not call fsync on the destination (faster but less safe)
    #[arg(long)]
    no_sync: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Long flags accepted with a single leading dash.
const LONG_FLAGS: &[&str] = &[
    "from",
    "to",
    "offset",
    "limit",
    "on-existing",
    "buffer-size",
    "progress",
    "output",
    "plan",
    "dry-run",
    "no-sync",
    "verbose",
    "help",
    "version",
];

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum ExistingPolicy {
    /// Append to the existing file (default)
    Append,
    /// Fail if the destination exists
    Error,
}

impl From<ExistingPolicy> for OnExisting {
    fn from(policy: ExistingPolicy) -> Self {
        match policy {
            ExistingPolicy::Append => OnExisting::Append,
            ExistingPolicy::Error => OnExisting::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum ProgressMode {
    /// One "Read N bytes out of M" line per read on stdout
    Lines,
    /// Progress bar on stderr
    Bar,
    /// No progress reporting
    None,
}

impl ProgressMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Bar => "bar",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
        }
    }
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Range(error) => error.code(),
            Self::JsonSerialize { .. } => ErrorCode::IoError,
        }
    }
}

#[derive(Debug, Clone)]
struct EffectiveConfig {
    on_existing: OnExisting,
    buffer_size: usize,
    fsync: bool,
    progress: ProgressMode,
    output_mode: OutputMode,
}

impl EffectiveConfig {
    fn to_json_value(&self) -> Value {
        json!({
            "on_existing": self.on_existing.as_str(),
            "buffer_size": self.buffer_size,
            "fsync": self.fsync,
            "progress": self.progress.as_str(),
            "output_mode": self.output_mode.as_str(),
        })
    }

    fn print_human_stderr(&self) {
        eprintln!("Effective configuration:");
        eprintln!("  on_existing: {}", self.on_existing.as_str());
        eprintln!("  buffer_size: {}", self.buffer_size);
        eprintln!("  fsync: {}", self.fsync);
        eprintln!("  progress: {}", self.progress.as_str());
        eprintln!("  output_mode: {}", self.output_mode.as_str());
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    if code.is_validation() { 2 } else { 1 }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error[{}]: {}", error.code(), error);
        std::process::exit(exit_code_for(error.code()));
    }
}

fn run() -> CliResult<()> {
    let args = Args::parse_from(normalize_go_style_flags(std::env::args_os()));

    let request = CopyRequest::new(
        args.from.clone().unwrap_or_default(),
        args.to.clone().unwrap_or_default(),
        args.offset,
        args.limit,
    )?;

    let (options, effective_config) = build_options_and_effective_config(&args);

    if effective_config.output_mode == OutputMode::Human && args.verbose {
        effective_config.print_human_stderr();
    }

    if args.plan {
        let plan = plan_range(&request, &options)?;
        return emit_plan_output(&effective_config, &request, &plan);
    }

    match execute(&request, &options, effective_config.progress) {
        Ok(stats) => {
            if effective_config.output_mode == OutputMode::Json {
                print_json_value(&execute_payload(
                    &effective_config,
                    &request,
                    execute_success_value(&stats),
                ))?;
            } else if args.verbose {
                print_stats(&request, &stats);
            }
            Ok(())
        }
        Err(error) => {
            if effective_config.output_mode == OutputMode::Json {
                print_json_value(&execute_payload(
                    &effective_config,
                    &request,
                    json!({
                        "outcome": "failed",
                        "error_code": error.code().as_str(),
                        "error_message": error.to_string(),
                    }),
                ))?;
            }
            Err(error.into())
        }
    }
}

/// Rewrite Go-style `-flag` / `-flag=value` arguments to `--flag`.
///
/// Only names in [`LONG_FLAGS`] are rewritten, so negative numbers and
/// short flags pass through untouched. Everything after `--` is left alone.
fn normalize_go_style_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for (index, arg) in args.into_iter().enumerate() {
        if index == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }
        match arg.to_str().and_then(go_style_long_flag) {
            Some(long) => normalized.push(long.into()),
            None => normalized.push(arg),
        }
    }

    normalized
}

fn go_style_long_flag(arg: &str) -> Option<String> {
    let rest = arg.strip_prefix('-')?;
    if rest.starts_with('-') {
        return None;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name).then(|| format!("-{arg}"))
}

fn build_options_and_effective_config(args: &Args) -> (RangeOptions, EffectiveConfig) {
    let on_existing = OnExisting::from(args.on_existing);
    let fsync = !args.no_sync;

    // Progress lines would interleave with the JSON document on stdout.
    let progress = if args.output == OutputMode::Json {
        ProgressMode::None
    } else {
        args.progress
    };

    let mut options = RangeOptions::default()
        .with_on_existing(on_existing)
        .with_buffer_size(args.buffer_size);

    if !fsync {
        options = options.without_fsync();
    }

    if args.verbose && args.output == OutputMode::Human {
        options = options.with_warn_handler(|msg| {
            eprintln!("warning: {}", msg);
        });
    }

    let effective_config = EffectiveConfig {
        on_existing,
        buffer_size: args.buffer_size,
        fsync,
        progress,
        output_mode: args.output,
    };

    (options, effective_config)
}

fn execute(
    request: &CopyRequest,
    options: &RangeOptions,
    progress: ProgressMode,
) -> rangecopy::Result<RangeCopyStats> {
    match progress {
        ProgressMode::Lines => copy_range_with_progress(request, options, |read, limit| {
            println!("{}", format_progress_line(read, limit));
        }),
        ProgressMode::Bar => {
            // The clamped limit is only known once the copy has started.
            let mut pb: Option<ProgressBar> = None;
            let result = copy_range_with_progress(request, options, |read, limit| {
                pb.get_or_insert_with(|| create_progress_bar(limit))
                    .set_position(read);
            });
            if let Some(pb) = pb {
                pb.finish_and_clear();
            }
            result
        }
        ProgressMode::None => copy_range(request, options),
    }
}

fn emit_plan_output(
    effective_config: &EffectiveConfig,
    request: &CopyRequest,
    plan: &RangePlan,
) -> CliResult<()> {
    match effective_config.output_mode {
        OutputMode::Human => {
            println!("Plan:");
            println!("  action: {}", plan.action.as_str());
            println!("  source: {} ({} bytes)", request.source().display(), plan.source_len);
            println!("  destination: {}", request.destination().display());
            println!(
                "  range: [{}, {}) ({} of {} requested bytes)",
                plan.offset,
                plan.offset.saturating_add(plan.limit),
                plan.limit,
                request.limit()
            );
            Ok(())
        }
        OutputMode::Json => {
            let payload = json!({
                "schema_version": "1.0",
                "mode": "plan",
                "effective_config": effective_config.to_json_value(),
                "plan": {
                    "source": request.source().display().to_string(),
                    "destination": request.destination().display().to_string(),
                    "source_len": plan.source_len,
                    "offset": plan.offset,
                    "requested_limit": request.limit(),
                    "limit": plan.limit,
                    "destination_len": plan.destination_len,
                    "action": plan.action.as_str(),
                },
            });
            print_json_value(&payload)
        }
    }
}

fn execute_success_value(stats: &RangeCopyStats) -> Value {
    let outcome = if stats.beyond_end {
        "skipped_beyond_end"
    } else {
        "copied"
    };
    json!({
        "outcome": outcome,
        "source_len": stats.source_len,
        "limit": stats.limit,
        "bytes_copied": stats.bytes_copied,
        "reads": stats.reads,
    })
}

fn execute_payload(
    effective_config: &EffectiveConfig,
    request: &CopyRequest,
    mut result: Value,
) -> Value {
    if let Value::Object(ref mut obj) = result {
        obj.insert(
            "source".to_owned(),
            Value::String(request.source().display().to_string()),
        );
        obj.insert(
            "destination".to_owned(),
            Value::String(request.destination().display().to_string()),
        );
        obj.insert("offset".to_owned(), Value::Number(request.offset().into()));
        obj.insert(
            "requested_limit".to_owned(),
            Value::Number(request.limit().into()),
        );
    }

    json!({
        "schema_version": "1.0",
        "mode": "execute",
        "effective_config": effective_config.to_json_value(),
        "result": result,
    })
}

fn print_stats(request: &CopyRequest, stats: &RangeCopyStats) {
    if stats.beyond_end {
        eprintln!(
            "Nothing copied: offset {} is past the end of {} ({})",
            request.offset(),
            request.source().display(),
            format_bytes(stats.source_len)
        );
        return;
    }

    let secs = stats.duration.as_secs_f64();
    let throughput = if secs > 0.0 {
        format!("{}/s", format_bytes((stats.bytes_copied as f64 / secs) as u64))
    } else {
        "n/a".to_owned()
    };
    eprintln!(
        "Copied {} from offset {} in {} reads ({:.2?}, {})",
        format_bytes(stats.bytes_copied),
        request.offset(),
        stats.reads,
        stats.duration,
        throughput
    );
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
