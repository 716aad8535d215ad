//! Binary-level tests for `mcversions`
//!
//! Only offline scenarios: the manifest URL points at a closed loopback
//! port so every remote call fails fast.

use anyhow::Result;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const UNREACHABLE_MANIFEST: &str = "http://127.0.0.1:9/mc/game/version_manifest_v2.json";

fn run_in(dir: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_mcversions"))
        .args(args)
        .current_dir(dir)
        .env("MCVERSIONS_MANIFEST_URL", UNREACHABLE_MANIFEST)
        .env("MCVERSIONS_TIMEOUT_SECONDS", "5")
        .env_remove("MCVERSIONS_CATALOG_DIR")
        .env_remove("GITHUB_OUTPUT")
        .env_remove("GITHUB_STEP_SUMMARY")
        .env_remove("RUST_LOG")
        .output()?;
    Ok(output)
}

#[test]
fn test_invalid_channel_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let output = run_in(temp_dir.path(), &["old_alpha"])?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("old_alpha"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn test_missing_channel_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let output = run_in(temp_dir.path(), &[])?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn test_unreachable_manifest_exits_cleanly_without_writing() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let output = run_in(temp_dir.path(), &["release"])?;

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(!temp_dir.path().join("release.json").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("No release versions found in the remote manifest"),
        "stdout: {stdout}"
    );
    assert!(!stdout.contains("up to date"), "stdout: {stdout}");
    Ok(())
}

#[test]
fn test_existing_catalog_is_left_untouched_when_nothing_to_do() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("snapshot.json");
    let original = r#"[{"name": "24w14a"}]"#;
    std::fs::write(&path, original)?;

    let output = run_in(temp_dir.path(), &["snapshot"])?;

    assert!(output.status.success());
    assert_eq!(std::fs::read_to_string(&path)?, original);
    Ok(())
}

#[test]
fn test_corrupt_catalog_fails_the_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("release.json");
    std::fs::write(&path, "[{\"name\": ")?;

    let output = run_in(temp_dir.path(), &["release"])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("release.json"), "stderr: {stderr}");
    assert_eq!(std::fs::read_to_string(&path)?, "[{\"name\": ");
    Ok(())
}

#[test]
fn test_catalog_dir_from_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    std::fs::create_dir(temp_dir.path().join("data"))?;
    std::fs::write(temp_dir.path().join("data").join("release.json"), "{}")?;
    std::fs::write(
        temp_dir.path().join("mcversions.json"),
        serde_json::json!({"catalog_dir": "data"}).to_string(),
    )?;

    // A top-level object in the configured catalog proves the config was read
    let output = run_in(temp_dir.path(), &["release"])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("JSON array"), "stderr: {stderr}");
    Ok(())
}
