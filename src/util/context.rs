//! Global context for clustalo-build operations.
//!
//! Provides centralized access to the working directory and config paths.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::util::config::{load_config, Config};

/// Name of the per-user and per-project settings directory.
pub const SETTINGS_DIR: &str = ".clustalo-build";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory (the project root)
    cwd: PathBuf,

    /// Home directory for global settings (~/.clustalo-build/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let home = BaseDirs::new()
            .map(|b| b.home_dir().join(SETTINGS_DIR))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_DIR));

        GlobalContext { cwd, home }
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global settings directory (~/.clustalo-build/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Get the project-local settings directory.
    pub fn project_dir(&self) -> PathBuf {
        self.cwd.join(SETTINGS_DIR)
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        self.project_dir().join("config.toml")
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self) -> Config {
        load_config(&self.config_path(), &self.project_config_path())
    }
}
