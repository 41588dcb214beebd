//! OpenMP flag resolution.

use std::fmt;

use crate::builder::errors::ProvisionError;
use crate::builder::probe::{probe, MissingItem};
use crate::core::flags::{FlagSet, ToolFormula};
use crate::core::platform::Platform;
use crate::util::process::CommandExecutor;

/// Whether OpenMP support should be attempted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParallelMode {
    /// Use OpenMP when the toolchain is installed.
    #[default]
    Auto,
    /// Never use OpenMP; the toolchain is not probed.
    Disabled,
}

impl ParallelMode {
    pub fn from_disabled(disabled: bool) -> Self {
        if disabled {
            ParallelMode::Disabled
        } else {
            ParallelMode::Auto
        }
    }
}

/// Why a resolution fell back to the degraded flag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// OpenMP was switched off by configuration.
    Disabled,
    /// Part of the OpenMP toolchain is not installed.
    Missing(MissingItem),
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::Disabled => f.write_str("OpenMP disabled by configuration"),
            DegradeReason::Missing(item) => write!(f, "{} not found", item),
        }
    }
}

/// Result of resolving flags, with the reason when degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub platform: Platform,
    pub toolchain: ToolFormula,
    pub flags: FlagSet,
    pub degraded: Option<DegradeReason>,
}

/// Resolves the OpenMP compiler and linker flags for a platform.
pub struct FlagResolver<'a> {
    executor: &'a dyn CommandExecutor,
    mode: ParallelMode,
}

impl<'a> FlagResolver<'a> {
    /// Create a resolver probing through `executor`.
    pub fn new(executor: &'a dyn CommandExecutor, mode: ParallelMode) -> Self {
        FlagResolver { executor, mode }
    }

    /// Resolve the flag set for `platform`.
    pub fn resolve(&self, platform: Platform) -> Result<FlagSet, ProvisionError> {
        Ok(self.resolve_detailed(platform)?.flags)
    }

    /// Resolve the flag set and report why it degraded, if it did.
    ///
    /// A missing toolchain is logged as a warning and yields the degraded set;
    /// only a failing listing command is an error.
    pub fn resolve_detailed(&self, platform: Platform) -> Result<Resolution, ProvisionError> {
        let toolchain = ToolFormula::for_platform(platform);

        let degraded = match self.mode {
            ParallelMode::Disabled => {
                tracing::info!("OpenMP disabled, building without parallel support");
                Some(DegradeReason::Disabled)
            }
            ParallelMode::Auto => {
                probe(self.executor, toolchain.manager, toolchain.formula)?.map(|missing| {
                    tracing::warn!(
                        "{} not found -- cannot compile parallelized code",
                        missing
                    );
                    DegradeReason::Missing(missing)
                })
            }
        };

        let flags = if degraded.is_some() {
            FlagSet::degraded()
        } else {
            FlagSet::full(platform)
        };

        Ok(Resolution {
            platform,
            toolchain,
            flags,
            degraded,
        })
    }
}
