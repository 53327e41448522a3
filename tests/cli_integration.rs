//! Integration tests for the CredVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Secrets are piped through stdin so no interactive prompt is needed.
//! The clipboard command is not exercised (no display server in CI).

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: a Command pointing at the credvault binary, rooted at `root`.
fn credvault(root: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("credvault").expect("binary should exist");
    cmd.arg("--root").arg(root.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn initialized_root() -> TempDir {
    let tmp = TempDir::new().unwrap();
    credvault(&tmp).arg("init").assert().success();
    tmp
}

#[test]
fn help_flag_shows_usage() {
    #[allow(deprecated)]
    Command::cargo_bin("credvault")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted personal credential store"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("copy"));
}

#[test]
fn no_args_shows_help() {
    #[allow(deprecated)]
    Command::cargo_bin("credvault")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn init_creates_key_file_and_directories() {
    let tmp = initialized_root();

    assert!(tmp.path().join("config").join("encflekey.txt").is_file());
    assert!(tmp.path().join("accounts").is_dir());
    assert!(tmp.path().join("archived").is_dir());

    // Running it again keeps the existing key.
    let key_before = std::fs::read(tmp.path().join("config/encflekey.txt")).unwrap();
    credvault(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("existing key file"));
    let key_after = std::fs::read(tmp.path().join("config/encflekey.txt")).unwrap();
    assert_eq!(key_before, key_after);
}

#[test]
fn add_without_key_file_fails() {
    let tmp = TempDir::new().unwrap();

    credvault(&tmp)
        .args(["add", "Mail", "user@x.com"])
        .write_stdin("p@ss\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("credvault init"));
}

#[test]
fn add_then_list_masks_the_secret() {
    let tmp = initialized_root();

    credvault(&tmp)
        .args(["add", "Mail", "user@x.com"])
        .write_stdin("p@ss\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Account 'Mail' added"));

    credvault(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mail"))
        .stdout(predicate::str::contains("user@x.com"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("p@ss").not());
}

#[test]
fn add_with_blank_secret_fails() {
    let tmp = initialized_root();

    credvault(&tmp)
        .args(["add", "Mail", "user@x.com"])
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be blank"));
}

#[test]
fn update_moves_old_version_to_archive() {
    let tmp = initialized_root();

    credvault(&tmp)
        .args(["add", "Mail", "user@x.com"])
        .write_stdin("p@ss\n")
        .assert()
        .success();

    credvault(&tmp)
        .args(["update", "1", "--identifier", "user2@x.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("version 2"));

    credvault(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("user2@x.com"));

    credvault(&tmp)
        .args(["list", "--archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user@x.com"))
        .stdout(predicate::str::contains("user2@x.com").not());
}

#[test]
fn update_invalid_position_warns() {
    let tmp = initialized_root();

    credvault(&tmp)
        .args(["add", "Mail", "user@x.com"])
        .write_stdin("p@ss\n")
        .assert()
        .success();

    credvault(&tmp)
        .args(["update", "5", "--identifier", "x"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid choice 5"));
}

#[test]
fn delete_with_force_removes_account() {
    let tmp = initialized_root();

    credvault(&tmp)
        .args(["add", "Mail", "user@x.com"])
        .write_stdin("p@ss\n")
        .assert()
        .success();

    credvault(&tmp)
        .args(["delete", "1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted account 'Mail'"));

    credvault(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active accounts yet"));

    credvault(&tmp)
        .args(["list", "--archived"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No archived accounts yet"));
}
