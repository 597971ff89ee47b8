//! Integration tests for the command-line entry point.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A settings file pointing WinGet at a program that does not exist.
fn missing_winget_config() -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("adopt.yml");
    fs::write(&path, "winget: choco-adopt-test-no-such-winget\n").unwrap();
    (temp, path)
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("choco-adopt"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("neither WinGet nor Chocolatey"))
        .stdout(predicate::str::contains("--config"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("choco-adopt"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_arguments() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("choco-adopt"));
    cmd.arg("--frobnicate");
    cmd.assert().failure().code(2);
    Ok(())
}

#[test]
fn cli_missing_tool_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, config) = missing_winget_config();
    let mut cmd = Command::new(cargo_bin("choco-adopt"));
    cmd.arg("--config").arg(&config).arg("--no-color");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("WinGet is not available"));
    Ok(())
}

#[test]
fn cli_reads_config_from_environment() -> Result<(), Box<dyn std::error::Error>> {
    let (_temp, config) = missing_winget_config();
    let mut cmd = Command::new(cargo_bin("choco-adopt"));
    cmd.env("CHOCO_ADOPT_CONFIG", &config);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("WinGet is not available"));
    Ok(())
}

#[test]
fn cli_missing_config_file_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let mut cmd = Command::new(cargo_bin("choco-adopt"));
    cmd.arg("--config").arg(temp.path().join("absent.yml"));
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn cli_invalid_config_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let config = temp.path().join("adopt.yml");
    fs::write(&config, "exclude_pattern: \"^(Microsoft\"\n")?;
    let mut cmd = Command::new(cargo_bin("choco-adopt"));
    cmd.arg("--config").arg(&config);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("exclude_pattern"));
    Ok(())
}
