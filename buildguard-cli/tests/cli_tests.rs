//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

/// Build command for the buildguard-cli binary.
fn buildguard_cli() -> Command {
    cargo_bin_cmd!("buildguard-cli")
}

/// Path to buildguard library test fixtures (relative to workspace).
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("buildguard")
        .join("tests")
        .join("fixtures")
}

fn catalog_dir() -> PathBuf {
    fixtures_dir().join("catalog")
}

fn build_file(name: &str) -> PathBuf {
    fixtures_dir().join("builds").join(name)
}

#[test]
fn test_cli_help() {
    let mut cmd = buildguard_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("compatibility"));
}

#[test]
fn test_cli_version() {
    let mut cmd = buildguard_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_check_balanced_build() {
    let mut cmd = buildguard_cli();

    cmd.arg("check")
        .arg("--catalog")
        .arg(catalog_dir())
        .arg("--build")
        .arg(build_file("balanced.json"))
        .arg("--fail-on")
        .arg("warning");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Estimated power: 315W"))
        .stdout(predicate::str::contains("No issues found"));
}

#[test]
fn test_cli_check_mismatched_build_fails_on_error() {
    let mut cmd = buildguard_cli();

    cmd.arg("check")
        .arg("--catalog")
        .arg(catalog_dir())
        .arg("--build")
        .arg(build_file("mismatched.json"))
        .arg("--fail-on")
        .arg("error");

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("[cpu_socket] Socket mismatch: CPU 1700 vs motherboard AM4"))
        .stdout(predicate::str::contains("incompatible"));
}

#[test]
fn test_cli_check_without_fail_on_succeeds() {
    let mut cmd = buildguard_cli();

    cmd.arg("check")
        .arg("--catalog")
        .arg(catalog_dir())
        .arg("--build")
        .arg(build_file("mismatched.json"));

    cmd.assert().success();
}

#[test]
fn test_cli_check_json_output() {
    let mut cmd = buildguard_cli();

    cmd.arg("check")
        .arg("--catalog")
        .arg(catalog_dir())
        .arg("--build")
        .arg(build_file("mismatched.json"))
        .arg("--format")
        .arg("json");

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["compatible"], false);
    assert_eq!(json["estimated_power_w"], 655.0);
    assert_eq!(json["summary"]["errors"], 5);
    assert_eq!(json["warnings"][0]["rule_id"], "gpu_length");
}

#[test]
fn test_cli_check_psu_headroom_override() {
    let mut cmd = buildguard_cli();

    cmd.arg("check")
        .arg("--catalog")
        .arg(catalog_dir())
        .arg("--build")
        .arg(build_file("balanced.json"))
        .arg("--psu-headroom")
        .arg("2.5")
        .arg("--fail-on")
        .arg("warning");

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("[psu_wattage]"));
}

#[test]
fn test_cli_check_options_file() {
    let dir = tempfile::tempdir().unwrap();
    let options = dir.path().join("options.json");
    std::fs::write(&options, r#"{"power_floor_w": 700}"#).unwrap();

    let mut cmd = buildguard_cli();
    cmd.arg("check")
        .arg("--catalog")
        .arg(catalog_dir())
        .arg("--build")
        .arg(build_file("balanced.json"))
        .arg("--options")
        .arg(&options)
        .arg("--fail-on")
        .arg("error");

    // RM650x is below a 700W floor.
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("PSU insufficient: 650W < 700W required"));
}

#[test]
fn test_cli_check_unknown_component() {
    let mut cmd = buildguard_cli();

    cmd.arg("check")
        .arg("--catalog")
        .arg(catalog_dir())
        .arg("--build")
        .arg(build_file("unknown_part.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Voodoo 5 6000"));
}

#[test]
fn test_cli_check_missing_catalog() {
    let mut cmd = buildguard_cli();

    cmd.arg("check")
        .arg("--catalog")
        .arg("/nonexistent/catalog")
        .arg("--build")
        .arg(build_file("balanced.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_cli_filter_motherboards_by_socket() {
    let mut cmd = buildguard_cli();

    cmd.arg("filter")
        .arg("--catalog")
        .arg(catalog_dir())
        .arg("motherboard")
        .arg("--socket")
        .arg("AM4");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("B550 Tomahawk"))
        .stdout(predicate::str::contains("B550I Aorus Pro AX"))
        .stdout(predicate::str::contains("X670E Hero").not());
}

#[test]
fn test_cli_filter_ram_from_build() {
    let dir = tempfile::tempdir().unwrap();
    let build = dir.path().join("partial.json");
    std::fs::write(&build, r#"{"motherboard": "X670E Hero"}"#).unwrap();

    let mut cmd = buildguard_cli();
    cmd.arg("filter")
        .arg("--catalog")
        .arg(catalog_dir())
        .arg("ram")
        .arg("--build")
        .arg(&build)
        .arg("--format")
        .arg("json");

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["category"], "ram");
    assert_eq!(json["supported_generations"], serde_json::json!(["DDR5"]));
    assert_eq!(json["candidates"], serde_json::json!(["Trident Z5 32GB"]));
}

#[test]
fn test_cli_filter_rejects_unknown_category() {
    let mut cmd = buildguard_cli();

    cmd.arg("filter")
        .arg("--catalog")
        .arg(catalog_dir())
        .arg("toaster");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("toaster"));
}

#[test]
fn test_cli_stats_json() {
    let mut cmd = buildguard_cli();

    cmd.arg("stats")
        .arg("--catalog")
        .arg(catalog_dir())
        .arg("--format")
        .arg("json");

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["counts"]["cpu"], 5);
    assert_eq!(json["architectures"], serde_json::json!(["AMD", "Intel"]));
}
