//! Precondition checks
//!
//! A missing entry script must stop the run before anything is installed.

use super::harness::{cfst_build, BuildAssertions, Project};

#[test]
fn missing_entry_script_fails_with_exit_1() {
    let project = Project::empty();
    let result = cfst_build(&project, &[]);

    result.assert_error_contains("Entry script not found: cloudflare_speedtest.py");
    assert_eq!(result.exit_code, 1);
    // Nothing past the precondition check ran
    assert!(!result.output_contains("Installing"));
}

#[test]
fn missing_entry_script_fails_in_static_mode() {
    let project = Project::empty().with_file("requirements.txt", "requests\n");
    let result = cfst_build(&project, &["--static"]);

    result.assert_error_contains("Entry script not found");
    assert!(!result.output_contains("system dependencies"));
}

#[test]
fn invalid_project_config_is_reported() {
    let project = Project::script_only().with_file("cfst-build.toml", "entry_script = [1, 2]\n");
    let result = cfst_build(&project, &["--dry-run"]);

    result.assert_error_contains("Failed to parse project config");
}

#[test]
fn json_dry_run_failure_keeps_stdout_clean() {
    let project = Project::empty();
    let result = cfst_build(&project, &["--dry-run", "--json"]);

    result.assert_failure();
    assert!(result.stdout.trim().is_empty(), "stdout: {}", result.stdout);
    assert!(result.stderr.contains("✗ Entry script not found"));
}
