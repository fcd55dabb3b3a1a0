//! Integration tests for the Passwordy CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Commands that need a live server and interactive credentials are
//! covered at the library level; here we stick to offline commands,
//! argument handling and failure paths.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper: the passwordy binary with a clean environment and an empty HOME.
fn passwordy(home: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("passwordy").expect("binary should exist");
    cmd.env("HOME", home.path())
        .env_remove("PASSWORDY_SERVER")
        .env_remove("PASSWORDY_USERNAME")
        .env_remove("PASSWORDY_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_flag_shows_usage() {
    let home = TempDir::new().unwrap();
    passwordy(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("password vault"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("reveal"))
        .stdout(predicate::str::contains("copy"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn version_flag_shows_version() {
    let home = TempDir::new().unwrap();
    passwordy(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passwordy"));
}

#[test]
fn no_args_shows_help() {
    let home = TempDir::new().unwrap();
    passwordy(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn generate_default_length() {
    let home = TempDir::new().unwrap();
    let output = passwordy(&home).arg("generate").output().unwrap();
    assert!(output.status.success());

    let password = String::from_utf8(output.stdout).unwrap();
    let password = password.trim_end();
    assert_eq!(password.chars().count(), 16);
    assert!(password
        .chars()
        .all(|c| passwordy::generator::ALPHABET.contains(c)));
}

#[test]
fn generate_custom_length() {
    let home = TempDir::new().unwrap();
    passwordy(&home)
        .args(["generate", "--length", "40"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\S{40}\n$").unwrap());
}

#[test]
fn generate_length_from_config() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.toml");
    std::fs::write(&config, "password_length = 24\n").unwrap();

    passwordy(&home)
        .args(["--config", config.to_str().unwrap(), "generate"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\S{24}\n$").unwrap());
}

#[test]
fn generate_zero_length_fails() {
    let home = TempDir::new().unwrap();
    passwordy(&home)
        .args(["generate", "--length", "0"])
        .assert()
        .failure();
}

#[test]
fn completions_bash() {
    let home = TempDir::new().unwrap();
    passwordy(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("passwordy"));
}

#[test]
fn completions_unknown_shell_fails() {
    let home = TempDir::new().unwrap();
    passwordy(&home)
        .args(["completions", "csh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'csh'"))
        .stderr(predicate::str::contains("bash"));
}

#[test]
fn invalid_server_url_rejected() {
    let home = TempDir::new().unwrap();
    passwordy(&home)
        .args(["--server", "ftp://vault.example.com", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http"));
}

#[test]
fn malformed_config_rejected() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("config.toml");
    std::fs::write(&config, "timeout_secs = \"soon\"\n").unwrap();

    passwordy(&home)
        .args(["--config", config.to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file error"));
}

#[test]
fn status_against_unreachable_server_fails() {
    let home = TempDir::new().unwrap();
    passwordy(&home)
        .args(["--server", "http://127.0.0.1:9", "status"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("http://127.0.0.1:9"))
        .stderr(predicate::str::contains("Could not reach the vault server"));
}

#[test]
fn edit_requires_item() {
    let home = TempDir::new().unwrap();
    passwordy(&home)
        .arg("edit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<ITEM>"));
}

#[test]
fn auth_help_shows_subcommands() {
    let home = TempDir::new().unwrap();
    passwordy(&home)
        .args(["auth", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keyring"));
}
