//! Dependency installation
//!
//! Static builds need a musl toolchain from the system package manager;
//! every build needs pip, PyInstaller and the project's requirements.

use crate::platform::PlatformInfo;
use crate::util::process::{ProcessError, ProcessRunner};
use crate::util::ui::Reporter;
use std::fmt;
use std::path::Path;

const APT_PACKAGES: &[&str] = &["build-essential", "zlib1g-dev", "libssl-dev", "musl-dev"];
const APK_PACKAGES: &[&str] = &["build-base", "zlib-dev", "openssl-dev", "musl-dev"];

/// Native package manager, identified by its config directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Apk,
}

impl PackageManager {
    /// Detect the host's package manager. apt wins if both are present.
    pub fn detect() -> Option<Self> {
        Self::detect_with(|marker| marker.exists())
    }

    pub fn detect_with(exists: impl Fn(&Path) -> bool) -> Option<Self> {
        if exists(Path::new("/etc/apt")) {
            Some(PackageManager::Apt)
        } else if exists(Path::new("/etc/apk")) {
            Some(PackageManager::Apk)
        } else {
            None
        }
    }

    /// Commands that install the static toolchain, in order
    pub fn install_commands(self, use_sudo: bool) -> Vec<Vec<String>> {
        match self {
            PackageManager::Apt => {
                let mut update = vec!["apt-get".to_string(), "update".to_string()];
                let mut install = vec![
                    "apt-get".to_string(),
                    "install".to_string(),
                    "-y".to_string(),
                ];
                install.extend(APT_PACKAGES.iter().map(|p| p.to_string()));
                if use_sudo {
                    update.insert(0, "sudo".to_string());
                    install.insert(0, "sudo".to_string());
                }
                vec![update, install]
            }
            PackageManager::Apk => {
                let mut add = vec!["apk".to_string(), "add".to_string(), "--no-cache".to_string()];
                add.extend(APK_PACKAGES.iter().map(|p| p.to_string()));
                vec![add]
            }
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageManager::Apt => write!(f, "apt"),
            PackageManager::Apk => write!(f, "apk"),
        }
    }
}

/// Why an install step did nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnsupportedHost(String),
    NoPackageManager,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedHost(os) => write!(
                f,
                "static builds are only supported on Linux (host is {}), skipping system dependencies",
                os
            ),
            SkipReason::NoPackageManager => write!(
                f,
                "no supported package manager found (apt or apk), skipping system dependencies"
            ),
        }
    }
}

/// Result of a best-effort install step
#[derive(Debug)]
pub enum InstallOutcome {
    Installed,
    Skipped(SkipReason),
    Failed(ProcessError),
}

/// Install the musl toolchain needed for static builds
pub fn install_system_deps(
    runner: &mut dyn ProcessRunner,
    ui: &mut dyn Reporter,
    platform: &PlatformInfo,
    package_manager: Option<PackageManager>,
    use_sudo: bool,
) -> InstallOutcome {
    if !platform.is_linux() {
        let reason = SkipReason::UnsupportedHost(platform.os_canonical.clone());
        ui.warn(&reason.to_string());
        return InstallOutcome::Skipped(reason);
    }

    let Some(manager) = package_manager else {
        let reason = SkipReason::NoPackageManager;
        ui.warn(&reason.to_string());
        return InstallOutcome::Skipped(reason);
    };

    ui.info("");
    ui.info(&format!(
        "Installing system dependencies for static build ({})...",
        manager
    ));

    for command in manager.install_commands(use_sudo) {
        if let Err(e) = runner.run(&command[0], &command[1..]) {
            return InstallOutcome::Failed(e);
        }
    }

    ui.success("System dependencies installed");
    InstallOutcome::Installed
}

/// Install pip, the packaging tool and the project's requirements
pub fn install_python_deps(
    runner: &mut dyn ProcessRunner,
    ui: &mut dyn Reporter,
    python: &str,
    packager: &str,
    requirements: Option<&Path>,
) -> InstallOutcome {
    ui.info("");
    ui.info("Installing Python dependencies...");

    let mut commands: Vec<Vec<String>> = vec![
        pip(&["install", "--upgrade", "pip"]),
        pip(&["install", packager]),
    ];
    if let Some(path) = requirements {
        let path = path.display().to_string();
        commands.push(pip(&["install", "-r", &path]));
    }

    for args in commands {
        if let Err(e) = runner.run(python, &args) {
            return InstallOutcome::Failed(e);
        }
    }

    ui.success("Python dependencies installed");
    InstallOutcome::Installed
}

fn pip(args: &[&str]) -> Vec<String> {
    let mut full = vec!["-m".to_string(), "pip".to_string()];
    full.extend(args.iter().map(|a| a.to_string()));
    full
}
