//! Throwaway project directories for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory laid out like the speed test repo
pub struct Project {
    pub path: PathBuf,
    _temp_dir: TempDir,
}

impl Project {
    /// An empty directory (no entry script)
    pub fn empty() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self {
            path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        }
    }

    /// Entry script only, no requirements.txt
    pub fn script_only() -> Self {
        Self::empty().with_file("cloudflare_speedtest.py", "print('speed test')\n")
    }

    /// Entry script and requirements.txt
    pub fn complete() -> Self {
        Self::script_only().with_file("requirements.txt", "requests>=2.31\n")
    }

    /// Write a file relative to the project root
    pub fn with_file(self, name: &str, content: &str) -> Self {
        let path = self.path.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_project_has_both_files() {
        let project = Project::complete();
        assert!(project.path.join("cloudflare_speedtest.py").is_file());
        assert!(project.path.join("requirements.txt").is_file());
    }
}
