//! Project configuration for cfst-build
//!
//! Reads an optional `cfst-build.toml` next to the entry script. Every
//! field has a default, so the file is only needed to deviate from the
//! standard project layout.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project config file
pub const CONFIG_FILE: &str = "cfst-build.toml";

/// Project-level configuration from cfst-build.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Script handed to the packaging tool
    pub entry_script: PathBuf,
    /// pip requirements file, installed when present
    pub requirements: PathBuf,
    /// Python interpreter used to drive pip (auto-detected if unset)
    pub python: Option<String>,
    /// Packaging tool, installed via pip and then invoked directly
    pub packager: String,
    /// Output directory for static builds
    pub dist_dir: PathBuf,
    /// Intermediate directory for static builds
    pub work_dir: PathBuf,
    /// Prefix apt commands with sudo
    pub use_sudo: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            entry_script: PathBuf::from("cloudflare_speedtest.py"),
            requirements: PathBuf::from("requirements.txt"),
            python: None,
            packager: "pyinstaller".to_string(),
            dist_dir: PathBuf::from("dist"),
            work_dir: PathBuf::from("build"),
            use_sudo: true,
        }
    }
}

impl BuildConfig {
    /// Load project config from a directory.
    /// Returns the default config if the file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: BuildConfig = toml::from_str(&content).with_context(|| {
            format!("Failed to parse project config: {}", config_path.display())
        })?;

        tracing::debug!(path = %config_path.display(), "loaded project config");
        Ok(config)
    }

    /// Python interpreter to run pip with
    pub fn python(&self) -> String {
        if let Some(python) = &self.python {
            return python.clone();
        }
        detect_python().unwrap_or_else(|| "python3".to_string())
    }
}

/// Find a Python interpreter on PATH
fn detect_python() -> Option<String> {
    ["python3", "python"]
        .into_iter()
        .find(|name| which::which(name).is_ok())
        .map(str::to_string)
}
