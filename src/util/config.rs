//! Configuration file support for clustalo-build.
//!
//! Two configuration file locations are read:
//! - Global: `~/.clustalo-build/config.toml` - User-wide defaults
//! - Project: `.clustalo-build/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Environment variables
//! are folded in afterwards by [`Config::apply_env`], and command-line flags
//! win over everything.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::bootstrap::{BootstrapOptions, DEFAULT_ARCHIVE};
use crate::builder::resolver::ParallelMode;

/// Environment variable that switches OpenMP support off.
pub const OPENMP_DISABLED_ENV: &str = "OPENMP_DISABLED";

/// clustalo-build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenMP settings
    pub parallel: ParallelConfig,

    /// Native library bootstrap settings
    pub bootstrap: BootstrapConfig,

    /// Where an installed libclustalo is looked for
    pub search: SearchConfig,
}

/// OpenMP-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Build without OpenMP even when the toolchain is installed (default: false)
    pub disabled: Option<bool>,
}

/// Bootstrap-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Path to the libclustalo source tarball (relative to the project root)
    pub archive: Option<PathBuf>,

    /// Run apt and `make install` through sudo (default: true)
    pub use_sudo: Option<bool>,

    /// Rebuild libclustalo even when it is already installed (default: false)
    pub force: Option<bool>,

    /// Skip the bootstrap entirely (default: false)
    pub skip: Option<bool>,

    /// Make program (default: make)
    pub make: Option<String>,
}

/// Installed-library search configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Directories searched for `clustal-omega.h`
    pub include_dirs: Vec<PathBuf>,

    /// Directories searched for libclustalo
    pub library_dirs: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.parallel.disabled.is_some() {
            self.parallel.disabled = other.parallel.disabled;
        }

        if other.bootstrap.archive.is_some() {
            self.bootstrap.archive = other.bootstrap.archive;
        }
        if other.bootstrap.use_sudo.is_some() {
            self.bootstrap.use_sudo = other.bootstrap.use_sudo;
        }
        if other.bootstrap.force.is_some() {
            self.bootstrap.force = other.bootstrap.force;
        }
        if other.bootstrap.skip.is_some() {
            self.bootstrap.skip = other.bootstrap.skip;
        }
        if other.bootstrap.make.is_some() {
            self.bootstrap.make = other.bootstrap.make;
        }

        if !other.search.include_dirs.is_empty() {
            self.search.include_dirs = other.search.include_dirs;
        }
        if !other.search.library_dirs.is_empty() {
            self.search.library_dirs = other.search.library_dirs;
        }
    }

    /// Fold environment overrides into this config.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`; it is a parameter
    /// so the environment is read once, at the command boundary.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(OPENMP_DISABLED_ENV) {
            if is_truthy(&value) {
                self.parallel.disabled = Some(true);
            }
        }
    }

    /// Whether OpenMP has been switched off.
    pub fn openmp_disabled(&self) -> bool {
        self.parallel.disabled.unwrap_or(false)
    }

    /// Whether the bootstrap should be skipped.
    pub fn skip_bootstrap(&self) -> bool {
        self.bootstrap.skip.unwrap_or(false)
    }

    /// The OpenMP mode for the flag resolver.
    pub fn parallel_mode(&self) -> ParallelMode {
        ParallelMode::from_disabled(self.openmp_disabled())
    }

    /// Bootstrap options, resolving relative archive paths against `project_root`.
    pub fn bootstrap_options(&self, project_root: &Path) -> BootstrapOptions {
        let defaults = BootstrapOptions::default();
        let archive = self
            .bootstrap
            .archive
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE));

        BootstrapOptions {
            archive: project_root.join(archive),
            use_sudo: self.bootstrap.use_sudo.unwrap_or(defaults.use_sudo),
            force: self.bootstrap.force.unwrap_or(false),
            openmp: !self.openmp_disabled(),
            make: self.bootstrap.make.clone().unwrap_or(defaults.make),
            include_dirs: if self.search.include_dirs.is_empty() {
                defaults.include_dirs
            } else {
                self.search.include_dirs.clone()
            },
            library_dirs: if self.search.library_dirs.is_empty() {
                defaults.library_dirs
            } else {
                self.search.library_dirs.clone()
            },
        }
    }
}

/// Interpret an environment value as a boolean switch.
///
/// Any non-empty value turns the switch on except the usual spellings of "off".
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim().to_ascii_lowercase();
    !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.clustalo-build/config.toml)
/// 2. Global config (~/.clustalo-build/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}
