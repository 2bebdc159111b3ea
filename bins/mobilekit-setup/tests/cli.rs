use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("mobilekit-setup")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("mobilekit-setup")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mobilekit-setup"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    Command::cargo_bin("mobilekit-setup")
        .unwrap()
        .arg("bogus")
        .assert()
        .failure();
}

#[test]
fn run_with_unreadable_config_fails() {
    Command::cargo_bin("mobilekit-setup")
        .unwrap()
        .args(["run", "--config", "/nonexistent/mobilekit.toml"])
        .assert()
        .failure();
}
