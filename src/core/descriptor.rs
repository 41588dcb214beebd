//! The build descriptor handed to the packaging step.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::flags::FlagSet;

/// Name of the extension module.
pub const MODULE_NAME: &str = "clustalo";

/// Source files of the extension module.
pub const SOURCES: &[&str] = &["clustalo.c"];

/// Header locations for a system-wide and a locally installed libclustalo.
pub const INCLUDE_DIRS: &[&str] = &["/usr/include/clustalo", "/usr/local/include/clustalo"];

/// Library locations searched at link time.
pub const LIBRARY_DIRS: &[&str] = &["/usr/local/lib"];

/// libclustalo is C++ internally, so the C++ runtime must be linked too.
pub const LIBRARIES: &[&str] = &["clustalo", "stdc++"];

/// Fully resolved inputs for compiling and linking the extension module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildDescriptor {
    pub name: String,
    pub sources: Vec<PathBuf>,
    pub include_dirs: Vec<PathBuf>,
    pub library_dirs: Vec<PathBuf>,
    pub libraries: Vec<String>,
    pub extra_compile_args: Vec<String>,
    pub extra_link_args: Vec<String>,
}

/// Assemble the descriptor from a resolved flag set.
pub fn assemble(flags: FlagSet) -> BuildDescriptor {
    let (extra_compile_args, extra_link_args) = flags.into_parts();

    BuildDescriptor {
        name: MODULE_NAME.to_string(),
        sources: SOURCES.iter().map(PathBuf::from).collect(),
        include_dirs: INCLUDE_DIRS.iter().map(PathBuf::from).collect(),
        library_dirs: LIBRARY_DIRS.iter().map(PathBuf::from).collect(),
        libraries: LIBRARIES.iter().map(|s| s.to_string()).collect(),
        extra_compile_args,
        extra_link_args,
    }
}

impl BuildDescriptor {
    /// Compiler arguments: include paths followed by the extra compile args.
    pub fn compile_args(&self) -> Vec<String> {
        self.include_dirs
            .iter()
            .map(|dir| format!("-I{}", dir.display()))
            .chain(self.extra_compile_args.iter().cloned())
            .collect()
    }

    /// Linker arguments: library paths, libraries, then the extra link args.
    pub fn link_args(&self) -> Vec<String> {
        self.library_dirs
            .iter()
            .map(|dir| format!("-L{}", dir.display()))
            .chain(self.libraries.iter().map(|lib| format!("-l{}", lib)))
            .chain(self.extra_link_args.iter().cloned())
            .collect()
    }

    /// Whether the descriptor builds with OpenMP.
    pub fn is_parallel(&self) -> bool {
        !self.extra_compile_args.is_empty()
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize build descriptor")
    }
}
