//! Integration tests that exercise the sf binary end to end.
//!
//! These cover the process-level contract: exit codes and the error
//! report on stderr. They need a built binary, so they are gated.
//!
//! Run with: `cargo test --features integration`

#![cfg(feature = "integration")]

use std::process::Command;

/// Get the path to the sf binary
fn sf_binary() -> String {
    let output = Command::new("cargo")
        .args(["build", "--release", "-p", "sendfile-cli"])
        .output()
        .expect("Failed to build sf binary");

    if !output.status.success() {
        panic!(
            "Failed to build sf binary: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    env!("CARGO_MANIFEST_DIR").to_string() + "/../../target/release/sf"
}

#[test]
fn invalid_inputs_report_every_problem_and_exit_one() {
    let output = Command::new(sf_binary())
        .args(["", "relative/path", "", "   ", "--port=-1", "--no-color"])
        .env_remove("SENDFILE_PASSWORD")
        .env_remove("SENDFILE_BASE64_KEY")
        .output()
        .expect("Failed to execute sf");

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid host address <>"));
    assert!(stderr.contains("Invalid port -1: port has to be greater than zero"));
    assert!(stderr.contains("No user name specified"));
    assert!(stderr.contains("No upload file path specified"));
    assert!(stderr.contains("Target folder has to be an absolute path on the server"));
}

#[test]
fn json_mode_emits_a_single_error_object() {
    let output = Command::new(sf_binary())
        .args(["", "/incoming", "ssh://example.com", "alice", "--json"])
        .env_remove("SENDFILE_PASSWORD")
        .env_remove("SENDFILE_BASE64_KEY")
        .output()
        .expect("Failed to execute sf");

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let json: serde_json::Value =
        serde_json::from_str(&stderr).expect("stderr should be one JSON object");
    assert!(json["error"].as_str().unwrap().contains("No upload file path specified"));
}

#[test]
fn missing_required_arguments_is_a_usage_error() {
    let output = Command::new(sf_binary())
        .output()
        .expect("Failed to execute sf");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}
