//! Command-line surface

use super::harness::Project;
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_static_flag() {
    Command::cargo_bin("cfst-build")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--static"));
}

#[test]
fn version_command_works() {
    Command::cargo_bin("cfst-build")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn json_without_dry_run_is_rejected() {
    Command::cargo_bin("cfst-build")
        .unwrap()
        .arg("--json")
        .assert()
        .failure();
}

#[test]
fn project_dir_flag_points_at_project() {
    let project = Project::complete();
    Command::cargo_bin("cfst-build")
        .unwrap()
        .args(["--dry-run", "-C"])
        .arg(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Requirements: requirements.txt"));
}

#[test]
fn verbose_dry_run_keeps_json_on_stdout() {
    let project = Project::complete();
    Command::cargo_bin("cfst-build")
        .unwrap()
        .current_dir(project.path())
        .env_remove("RUST_LOG")
        .args(["--dry-run", "--json", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}
