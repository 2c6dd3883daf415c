//! Error scenario integration tests

use std::process::Command;

fn api_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_audio-intercept-api"))
}

/// Binary isolated from the user's config and environment
fn isolated_bin(config_dir: &std::path::Path) -> Command {
    let mut cmd = api_bin();
    cmd.env_remove("OPENAI_API_KEY")
        .env_remove("PORT")
        .env_remove("HOST")
        .env_remove("OPENAI_BASE_URL")
        .arg("--config")
        .arg(config_dir.join("config.toml"));
    cmd
}

#[test]
fn missing_api_key_error() {
    let dir = tempfile::tempdir().unwrap();

    // The key is checked before binding, so this exits instead of serving
    let output = isolated_bin(dir.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Missing API key"),
        "Expected error about missing API key, got: {}",
        stderr
    );
}

#[test]
fn invalid_port_env_error() {
    let dir = tempfile::tempdir().unwrap();

    let output = isolated_bin(dir.path())
        .env("PORT", "ten-thousand")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("PORT"),
        "Expected error about PORT, got: {}",
        stderr
    );
}

#[test]
fn malformed_config_file_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "port = [not toml").unwrap();

    let output = isolated_bin(dir.path())
        .env("OPENAI_API_KEY", "sk-test")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("parse"),
        "Expected config parse error, got: {}",
        stderr
    );
}

#[test]
fn config_get_unknown_key() {
    let output = api_bin()
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let output = api_bin()
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_validation_mode() {
    let dir = tempfile::tempdir().unwrap();

    let output = api_bin()
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .args(["config", "set", "validation", "lenient"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("passthrough, strict"),
        "Expected error listing valid modes, got: {}",
        stderr
    );
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn config_init_twice_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let first = api_bin()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");
    assert!(first.status.success());

    let second = api_bin()
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .output()
        .expect("Failed to execute command");

    assert!(!second.status.success());
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(stderr.contains("already exists"), "got: {}", stderr);
}
