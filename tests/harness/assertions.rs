//! Custom assertions for cfst-build integration tests

use super::RunResult;

/// Extension trait for cfst-build-specific assertions
pub trait BuildAssertions {
    /// Assert that error output contains a message
    fn assert_error_contains(&self, message: &str);

    /// Assert command succeeded
    fn assert_success(&self);

    /// Assert command failed
    fn assert_failure(&self);
}

impl BuildAssertions for RunResult {
    fn assert_error_contains(&self, message: &str) {
        assert!(
            !self.success() && self.output_contains(message),
            "Expected error containing '{}', got:\nexit: {}\nstdout: {}\nstderr: {}",
            message,
            self.exit_code,
            self.stdout,
            self.stderr
        );
    }

    fn assert_success(&self) {
        assert!(
            self.success(),
            "Expected success (exit 0), got exit {}:\nstdout: {}\nstderr: {}",
            self.exit_code,
            self.stdout,
            self.stderr
        );
    }

    fn assert_failure(&self) {
        assert!(
            !self.success(),
            "Expected failure (non-zero exit), got exit 0:\nstdout: {}\nstderr: {}",
            self.stdout,
            self.stderr
        );
    }
}
