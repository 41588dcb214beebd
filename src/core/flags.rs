//! OpenMP toolchain identities and the compiler/linker flags they unlock.

use serde::Serialize;

use crate::core::platform::{PackageManager, Platform};

/// The package manager and formula that provide the OpenMP runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolFormula {
    /// Package manager used to check for the formula.
    pub manager: PackageManager,
    /// Formula or package name of the OpenMP runtime.
    pub formula: &'static str,
}

impl ToolFormula {
    /// Used on every platform without a dedicated entry.
    pub const DEFAULT: ToolFormula = ToolFormula {
        manager: PackageManager::Apt,
        formula: "libomp-dev",
    };

    /// Get the OpenMP tool/formula pair for a platform.
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::MacOs => ToolFormula {
                manager: PackageManager::Homebrew,
                formula: "libomp",
            },
            Platform::Linux | Platform::Other => ToolFormula::DEFAULT,
        }
    }
}

/// Compiler and linker arguments for the extension build.
///
/// A `FlagSet` is either the platform's full OpenMP set or fully degraded
/// (both sequences empty). The fields are private so no caller can build a
/// half-degraded set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagSet {
    compiler: Vec<String>,
    linker: Vec<String>,
}

impl FlagSet {
    /// The full OpenMP flag set for a platform.
    ///
    /// Apple clang has no `-fopenmp` driver flag; the pragma support has to be
    /// forwarded to the preprocessor and the runtime is linked as `libomp`.
    pub fn full(platform: Platform) -> Self {
        let (compiler, linker): (&[&str], &[&str]) = match platform {
            Platform::MacOs => (&["-Xpreprocessor", "-fopenmp"], &["-lomp"]),
            Platform::Linux | Platform::Other => (&["-fopenmp"], &["-fopenmp"]),
        };

        FlagSet {
            compiler: compiler.iter().map(|s| s.to_string()).collect(),
            linker: linker.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// The flag set used when OpenMP is unavailable or disabled.
    pub fn degraded() -> Self {
        FlagSet {
            compiler: Vec::new(),
            linker: Vec::new(),
        }
    }

    /// Extra compiler arguments.
    pub fn compiler(&self) -> &[String] {
        &self.compiler
    }

    /// Extra linker arguments.
    pub fn linker(&self) -> &[String] {
        &self.linker
    }

    /// Whether this set carries no parallel support.
    pub fn is_degraded(&self) -> bool {
        self.compiler.is_empty() && self.linker.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.compiler, self.linker)
    }
}
