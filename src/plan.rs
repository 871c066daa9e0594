//! Build planning
//!
//! Turns the host platform and the requested mode into the exact
//! PyInstaller invocation. Nothing here touches the filesystem.

use crate::config::BuildConfig;
use crate::platform::PlatformInfo;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

const ARTIFACT_PREFIX: &str = "CloudflareSpeedTest";

/// Where PyInstaller writes when no --distpath is given
const DEFAULT_DIST_DIR: &str = "dist";

/// Static builds always target OpenWRT on ARM64
pub const STATIC_OUTPUT_NAME: &str = "CloudflareSpeedTest-linux-arm64-static";

/// Modules requests pulls in at runtime that PyInstaller cannot see
pub const HIDDEN_IMPORTS: &[&str] = &[
    "requests",
    "urllib3",
    "certifi",
    "charset_normalizer",
    "idna",
];

/// Heavy optional modules the speed test never imports
pub const EXCLUDED_MODULES: &[&str] = &["tkinter", "matplotlib", "numpy", "pandas", "PIL", "cv2"];

/// Whether to produce the OpenWRT static binary or a native one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Normal,
    Static,
}

impl BuildMode {
    pub fn from_flag(is_static: bool) -> Self {
        if is_static {
            BuildMode::Static
        } else {
            BuildMode::Normal
        }
    }

    pub fn is_static(self) -> bool {
        self == BuildMode::Static
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Normal => write!(f, "normal"),
            BuildMode::Static => write!(f, "static"),
        }
    }
}

/// Fully resolved packaging invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    pub mode: BuildMode,
    pub output_name: String,
    pub program: String,
    pub tool_arguments: Vec<String>,
    /// Finished executable, relative to the project directory
    pub artifact: PathBuf,
}

impl BuildPlan {
    pub fn new(platform: &PlatformInfo, mode: BuildMode, config: &BuildConfig) -> Self {
        let output_name = output_name(platform, mode);

        let mut args: Vec<String> = vec![
            "--onefile".into(),
            "--name".into(),
            output_name.clone(),
            "--clean".into(),
            "--noconfirm".into(),
            "--strip".into(),
            "--optimize".into(),
            "2".into(),
            "--console".into(),
        ];

        // Only static builds pass --distpath; normal builds land in dist/
        let dist_dir = match mode {
            BuildMode::Static => config.dist_dir.clone(),
            BuildMode::Normal => PathBuf::from(DEFAULT_DIST_DIR),
        };
        let artifact = dist_dir.join(executable_name(platform, mode, &output_name));

        match mode {
            BuildMode::Normal => {
                push_repeated(&mut args, "--hidden-import", HIDDEN_IMPORTS);
                push_repeated(&mut args, "--exclude-module", EXCLUDED_MODULES);
            }
            BuildMode::Static => {
                args.extend([
                    "--target-architecture".to_string(),
                    "arm64".to_string(),
                    "--distpath".to_string(),
                    config.dist_dir.display().to_string(),
                    "--workpath".to_string(),
                    config.work_dir.display().to_string(),
                ]);
            }
        }

        args.push(config.entry_script.display().to_string());

        Self {
            mode,
            output_name,
            program: config.packager.clone(),
            tool_arguments: args,
            artifact,
        }
    }

    /// Where the packaging tool leaves the finished executable
    pub fn artifact_path(&self) -> &Path {
        &self.artifact
    }
}

/// File name PyInstaller gives the executable. Static builds target Linux
/// regardless of host; native Windows builds get `.exe`.
fn executable_name(platform: &PlatformInfo, mode: BuildMode, output_name: &str) -> String {
    if mode == BuildMode::Normal && platform.os_canonical == "windows" {
        format!("{}.exe", output_name)
    } else {
        output_name.to_string()
    }
}

/// Artifact name for a platform and mode
pub fn output_name(platform: &PlatformInfo, mode: BuildMode) -> String {
    match mode {
        BuildMode::Static => STATIC_OUTPUT_NAME.to_string(),
        BuildMode::Normal => format!(
            "{}-{}-{}",
            ARTIFACT_PREFIX, platform.os_canonical, platform.arch_canonical
        ),
    }
}

fn push_repeated(args: &mut Vec<String>, flag: &str, values: &[&str]) {
    for value in values {
        args.push(flag.to_string());
        args.push((*value).to_string());
    }
}
