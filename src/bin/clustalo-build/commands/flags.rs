//! `clustalo-build flags` command

use anyhow::{Context, Result};

use super::{context, load_effective_config, target_platform};
use crate::cli::FlagsArgs;
use clustalo_build::builder::FlagResolver;
use clustalo_build::core::assemble;
use clustalo_build::util::SystemExecutor;

pub fn execute(args: FlagsArgs) -> Result<()> {
    let ctx = context()?;
    let config = load_effective_config(&ctx, &args.platform);
    let platform = target_platform(&args.platform);

    let resolution = FlagResolver::new(&SystemExecutor, config.parallel_mode())
        .resolve_detailed(platform)
        .context("failed to resolve OpenMP flags")?;

    if let Some(reason) = &resolution.degraded {
        tracing::info!("OpenMP flags omitted: {}", reason);
    }

    let descriptor = assemble(resolution.flags);

    if args.json {
        println!("{}", descriptor.to_json()?);
        return Ok(());
    }

    if !args.link {
        println!("# Compile flags for `{}`:", descriptor.name);
        for flag in descriptor.compile_args() {
            println!("  {}", flag);
        }
    }

    if !args.compile && !args.link {
        println!();
    }

    if !args.compile {
        println!("# Link flags for `{}`:", descriptor.name);
        for flag in descriptor.link_args() {
            println!("  {}", flag);
        }
    }

    Ok(())
}
