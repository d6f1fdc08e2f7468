//! Plan/output contract tests for rangecp CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use serde_json::Value;

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_plan_human_and_no_mutation() {
    let fx = TestFixture::digits();

    cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-offset=8")
        .arg("-limit=100")
        .arg("-plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("action: create"))
        .stdout(predicate::str::contains("range: [8, 10) (2 of 100 requested bytes)"));

    assert!(!fx.dst.exists(), "plan mode must not mutate filesystem");
}

#[test]
fn test_plan_json_contract() {
    let fx = TestFixture::digits();
    fx.write_destination("abc");

    let output = cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-offset=2")
        .arg("-limit=5")
        .arg("--dry-run")
        .arg("-output=json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload = stdout_json(&output);
    assert_eq!(payload["schema_version"], "1.0");
    assert_eq!(payload["mode"], "plan");
    assert_eq!(payload["effective_config"]["on_existing"], "append");
    assert_eq!(payload["effective_config"]["output_mode"], "json");

    let plan = &payload["plan"];
    assert_eq!(plan["source"], fx.src.display().to_string());
    assert_eq!(plan["destination"], fx.dst.display().to_string());
    assert_eq!(plan["source_len"], 10);
    assert_eq!(plan["offset"], 2);
    assert_eq!(plan["requested_limit"], 5);
    assert_eq!(plan["limit"], 5);
    assert_eq!(plan["destination_len"], 3);
    assert_eq!(plan["action"], "append");

    fx.assert_destination("abc");
}

#[test]
fn test_plan_reports_conflict_without_failing() {
    let fx = TestFixture::digits();
    fx.write_destination("abc");

    let output = cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-on-existing=error")
        .arg("-plan")
        .arg("-output")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload = stdout_json(&output);
    assert_eq!(payload["plan"]["action"], "conflict");
    assert_eq!(payload["effective_config"]["on_existing"], "error");
}

#[test]
fn test_plan_skip_beyond_end() {
    let fx = TestFixture::digits();

    let output = cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-offset=20")
        .arg("-plan")
        .arg("-output=json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload = stdout_json(&output);
    assert_eq!(payload["plan"]["action"], "skip_beyond_end");
    assert_eq!(payload["plan"]["limit"], 0);
    assert!(payload["plan"]["destination_len"].is_null());
}

#[test]
fn test_execute_json_contract() {
    let fx = TestFixture::digits();

    let output = cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-offset=8")
        .arg("-limit=100")
        .arg("-output=json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    // Progress lines are suppressed so stdout is a single JSON document.
    let payload = stdout_json(&output);
    assert_eq!(payload["mode"], "execute");
    assert_eq!(payload["effective_config"]["progress"], "none");

    let result = &payload["result"];
    assert_eq!(result["outcome"], "copied");
    assert_eq!(result["offset"], 8);
    assert_eq!(result["requested_limit"], 100);
    assert_eq!(result["limit"], 2);
    assert_eq!(result["bytes_copied"], 2);
    assert_eq!(result["reads"], 1);
    assert_eq!(result["source_len"], 10);

    fx.assert_destination("89");
}

#[test]
fn test_execute_json_beyond_end() {
    let fx = TestFixture::digits();

    let output = cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&fx.src)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-offset=20")
        .arg("-output=json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload = stdout_json(&output);
    assert_eq!(payload["result"]["outcome"], "skipped_beyond_end");
    assert_eq!(payload["result"]["bytes_copied"], 0);
    assert!(!fx.dst.exists());
}

#[test]
fn test_execute_json_failure() {
    let fx = TestFixture::digits();
    let missing = fx.missing("missing.bin");

    let output = cargo_bin_cmd!("rangecp")
        .arg("-from")
        .arg(&missing)
        .arg("-to")
        .arg(&fx.dst)
        .arg("-output=json")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error[source_not_found]"))
        .get_output()
        .stdout
        .clone();

    let payload = stdout_json(&output);
    assert_eq!(payload["result"]["outcome"], "failed");
    assert_eq!(payload["result"]["error_code"], "source_not_found");
    assert_eq!(payload["result"]["source"], missing.display().to_string());
}
