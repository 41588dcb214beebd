//! Host platform identification.
//!
//! Every platform-specific decision in the crate dispatches on [`Platform`]
//! with an exhaustive `match`, so adding a platform is a compile error until
//! each decision point handles it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::util::process::ProcessBuilder;

/// Supported host operating systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// macOS and other Darwin hosts.
    MacOs,
    /// Linux distributions.
    Linux,
    /// Anything else. Falls back to the universal defaults.
    Other,
}

impl Platform {
    /// Detect the platform this process is running on.
    pub fn host() -> Self {
        Platform::from_os(std::env::consts::OS)
    }

    /// Map an OS name (as reported by `std::env::consts::OS` or `uname`) to a platform.
    pub fn from_os(os: &str) -> Self {
        match os.to_ascii_lowercase().as_str() {
            "macos" | "darwin" => Platform::MacOs,
            "linux" => Platform::Linux,
            _ => Platform::Other,
        }
    }

    /// Get the display name for this platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
            Platform::Other => "other",
        }
    }

    /// The package manager used to install system packages on this platform.
    ///
    /// `None` means system packages have to be provided by the operator.
    pub fn package_manager(&self) -> Option<PackageManager> {
        match self {
            Platform::MacOs => Some(PackageManager::Homebrew),
            Platform::Linux => Some(PackageManager::Apt),
            Platform::Other => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "macos" | "darwin" => Ok(Platform::MacOs),
            "linux" => Ok(Platform::Linux),
            "other" => Ok(Platform::Other),
            _ => Err(format!(
                "invalid platform '{}'; expected 'macos', 'linux', or 'other'",
                s
            )),
        }
    }
}

/// Host package managers that know how to list and install packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Homebrew,
    Apt,
}

impl PackageManager {
    /// Name of the executable looked up on `PATH`.
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Homebrew => "brew",
            PackageManager::Apt => "apt",
        }
    }

    /// Command that lists installed packages, one per line.
    pub fn list_command(&self) -> ProcessBuilder {
        match self {
            PackageManager::Homebrew => ProcessBuilder::new("brew").arg("list"),
            PackageManager::Apt => ProcessBuilder::new("apt").args(["list", "--installed"]),
        }
    }

    /// Commands that install `package`, in the order they must run.
    ///
    /// Apt refreshes its index first and always needs root; Homebrew refuses to
    /// run as root, so `use_sudo` only affects apt.
    pub fn install_commands(&self, package: &str, use_sudo: bool) -> Vec<ProcessBuilder> {
        match self {
            PackageManager::Homebrew => {
                vec![ProcessBuilder::new("brew").args(["install", package])]
            }
            PackageManager::Apt => vec![
                ProcessBuilder::privileged("apt", use_sudo).arg("update"),
                ProcessBuilder::privileged("apt", use_sudo).args(["install", package, "-y"]),
            ],
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}
