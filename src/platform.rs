//! Platform detection for artifact naming
//!
//! Raw names come from the Rust runtime; canonical names are what ends up
//! in `CloudflareSpeedTest-{os}-{arch}`.

use serde::Serialize;

/// Host platform, raw and canonical
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub os_raw: String,
    pub arch_raw: String,
    pub os_canonical: String,
    pub arch_canonical: String,
}

impl PlatformInfo {
    /// Build from raw identifiers as reported by the host
    pub fn from_raw(os_raw: &str, arch_raw: &str) -> Self {
        Self {
            os_raw: os_raw.to_string(),
            arch_raw: arch_raw.to_string(),
            os_canonical: canonical_os(os_raw),
            arch_canonical: canonical_arch(arch_raw),
        }
    }

    /// Detect the platform this binary is running on
    pub fn detect() -> Self {
        Self::from_raw(std::env::consts::OS, std::env::consts::ARCH)
    }

    pub fn is_linux(&self) -> bool {
        self.os_canonical == "linux"
    }
}

/// Map a raw OS name to its canonical token
pub fn canonical_os(raw: &str) -> String {
    let os = raw.trim().to_lowercase();
    let canonical = match os.as_str() {
        "darwin" => "macos",
        "linux" => "linux",
        "windows" => "windows",
        _ => return passthrough(os),
    };
    canonical.to_string()
}

/// Map a raw machine architecture to its canonical token
pub fn canonical_arch(raw: &str) -> String {
    let arch = raw.trim().to_lowercase();
    let canonical = match arch.as_str() {
        "x86_64" | "amd64" | "x64" => "amd64",
        "arm64" | "aarch64" => "arm64",
        // std reports 32-bit ARM as plain "arm"
        "armv7l" | "armv8l" | "arm" => "armhf",
        _ => return passthrough(arch),
    };
    canonical.to_string()
}

fn passthrough(lowered: String) -> String {
    if lowered.is_empty() {
        "unknown".to_string()
    } else {
        lowered
    }
}
