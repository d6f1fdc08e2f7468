//! Flag syntax and option integration tests for rangecp CLI.
//!
//! Flags are accepted Go-style (`-from x`, `-offset=2`) and with two dashes.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, patterned_bytes, progress_lines};
use predicates::prelude::*;

#[test]
fn test_double_dash_flags() {
    let fx = TestFixture::digits();

    cargo_bin_cmd!("rangecp")
        .arg("--from")
        .arg(&fx.src)
        .arg("--to")
        .arg(&fx.dst)
        .arg("--offset")
        .arg("2")
        .arg("--limit")
        .arg("5")
        .assert()
        .success()
        .stdout("Read 5 bytes out of 5\n");

    fx.assert_destination("23456");
}

#[test]
fn test_single_dash_equals_form() {
    let fx = TestFixture::digits();

    cargo_bin_cmd!("rangecp")
        .arg(format!("-from={}", fx.src.display()))
        .arg(format!("-to={}", fx.dst.display()))
        .arg("-offset=4")
        .arg("-limit=3")
        .assert()
        .success();

    fx.assert_destination("456");
}

#[test]
fn test_buffer_size_controls_read_size() {
    let fx = TestFixture::digits();

    let output = cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-buffer-size")
        .arg("4")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(
        progress_lines(&output),
        vec![
            "Read 4 bytes out of 10",
            "Read 8 bytes out of 10",
            "Read 10 bytes out of 10",
        ]
    );
    fx.assert_destination("0123456789");
}

#[test]
fn test_zero_buffer_size_still_copies() {
    let fx = TestFixture::digits();

    let output = cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-limit=3")
        .arg("-buffer-size=0")
        .arg("-verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: buffer size 0"))
        .get_output()
        .stdout
        .clone();

    assert_eq!(progress_lines(&output).len(), 3);
    fx.assert_destination("012");
}

#[test]
fn test_progress_none_prints_nothing() {
    let fx = TestFixture::with_source(patterned_bytes(2000));

    cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-progress")
        .arg("none")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fx.destination_bytes().len(), 2000);
}

#[test]
fn test_progress_bar_keeps_stdout_clean() {
    let fx = TestFixture::with_source(patterned_bytes(2000));

    cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-progress=bar")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fx.destination_bytes().len(), 2000);
}

#[test]
fn test_verbose_prints_config_and_summary() {
    let fx = TestFixture::digits();

    cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-offset=2")
        .arg("-limit=5")
        .arg("-no-sync")
        .arg("-verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("Effective configuration:"))
        .stderr(predicate::str::contains("fsync: false"))
        .stderr(predicate::str::contains("Copied 5 B from offset 2"));
}

#[test]
fn test_verbose_reports_offset_beyond_end() {
    let fx = TestFixture::digits();

    cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-offset=50")
        .arg("-v")
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing copied: offset 50"));
}

#[test]
fn test_unknown_on_existing_value() {
    let fx = TestFixture::digits();

    cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-on-existing")
        .arg("overwrite")
        .assert()
        .failure()
        .code(2);

    assert!(!fx.dst.exists());
}

#[test]
fn test_values_after_separator_not_rewritten() {
    // Without the rewrite, clap sees an unexpected positional and fails.
    cargo_bin_cmd!("rangecp")
        .arg("--")
        .arg("-from")
        .assert()
        .failure()
        .code(2);
}
