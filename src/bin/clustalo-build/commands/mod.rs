//! Command implementations

pub mod completions;
pub mod doctor;
pub mod flags;
pub mod provision;

use anyhow::Result;

use crate::cli::PlatformArgs;
use clustalo_build::core::Platform;
use clustalo_build::util::{Config, GlobalContext};

/// Load config files, then fold in the environment and command-line flags.
pub fn load_effective_config(ctx: &GlobalContext, args: &PlatformArgs) -> Config {
    let mut config = ctx.load_config();
    config.apply_env(|key| std::env::var(key).ok());

    if args.no_openmp {
        config.parallel.disabled = Some(true);
    }

    config
}

/// The requested platform, or the host's.
pub fn target_platform(args: &PlatformArgs) -> Platform {
    args.platform.unwrap_or_else(Platform::host)
}

/// Context rooted at the current directory.
pub fn context() -> Result<GlobalContext> {
    GlobalContext::new()
}
