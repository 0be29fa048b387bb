//! Tests for the `stroke-inject` binary on commands that never open the driver.

use std::path::PathBuf;
use std::process::{Command, Output};

use uuid::Uuid;

fn run_cli(args: &[&str]) -> Output {
    // A config path that does not exist keeps the run on built-in defaults.
    let config: PathBuf = std::env::temp_dir()
        .join(format!("stroke_inject_cli_{}", Uuid::new_v4()))
        .join("config.toml");
    Command::new(env!("CARGO_BIN_EXE_stroke-inject"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to start stroke-inject")
}

#[test]
fn test_resolve_prints_shift_then_base_key() {
    // Act
    let output = run_cli(&["resolve", "Á"]);

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "got {stdout}");
    assert!(lines[0].starts_with("0x2A"));
    assert!(lines[1].starts_with("0x28"));
}

#[test]
fn test_failed_command_reports_its_error_once() {
    // Act
    let output = run_cli(&["resolve", "☃"]);

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(
        stderr.matches("no mapping for character").count(),
        1,
        "stderr was: {stderr}"
    );
}
