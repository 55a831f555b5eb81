// CLI integration tests that run without the engine library installed.
use std::path::PathBuf;
use std::process::Command;

use serde_json::Value;

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_dataextract");
    let mut cmd = Command::new(exe);
    // Pin the loader to a path that cannot exist so the outcome does not
    // depend on an engine installed on the host.
    cmd.env("DATAEXTRACT_LIB", missing_library());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn missing_library() -> PathBuf {
    std::env::temp_dir()
        .join("dataextract-tests")
        .join("libmissing-engine.so")
}

fn parse_last_json_line(output: &[u8]) -> Value {
    let text = String::from_utf8_lossy(output);
    let line = text.lines().rev().find(|line| !line.trim().is_empty()).expect("json line");
    serde_json::from_str(line).expect("valid json")
}

#[test]
fn completion_works_without_engine() {
    let output = cmd()
        .args(["completion", "bash"])
        .output()
        .expect("completion");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("dataextract"));
}

#[test]
fn version_reports_library_error_as_json() {
    let output = cmd().arg("version").output().expect("version");
    assert_eq!(output.status.code(), Some(23));
    let err = parse_last_json_line(&output.stderr);
    assert_eq!(err["error"]["kind"], "library");
    assert!(
        err["error"]["hint"]
            .as_str()
            .expect("hint")
            .contains("DATAEXTRACT_LIB")
    );
}

#[test]
fn create_fails_cleanly_without_engine() {
    let temp = tempfile::tempdir().expect("tempdir");
    let file = temp.path().join("orders.extract");
    let output = cmd()
        .args(["create", file.to_str().unwrap(), "--rows", "5"])
        .output()
        .expect("create");
    assert_eq!(output.status.code(), Some(23));
    let err = parse_last_json_line(&output.stderr);
    assert_eq!(err["error"]["kind"], "library");
    // The library path that failed to load is part of the report.
    assert!(
        err["error"]["path"]
            .as_str()
            .expect("path")
            .contains("libmissing-engine")
    );
    assert!(!file.exists());
}

#[test]
fn lib_flag_overrides_environment() {
    let bogus = std::env::temp_dir()
        .join("dataextract-tests")
        .join("libother-missing.so");
    let output = cmd()
        .args(["--lib", bogus.to_str().unwrap(), "version"])
        .output()
        .expect("version");
    assert_eq!(output.status.code(), Some(23));
    let err = parse_last_json_line(&output.stderr);
    assert_eq!(err["error"]["kind"], "library");
    assert!(
        err["error"]["path"]
            .as_str()
            .expect("path")
            .contains("libother-missing")
    );
}

#[test]
fn help_lists_subcommands() {
    let output = cmd().arg("--help").output().expect("help");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["create", "schema", "version", "completion"] {
        assert!(text.contains(subcommand), "help is missing {subcommand}");
    }
}
