//! `clustalo-build provision` command

use anyhow::{Context, Result};

use super::{context, load_effective_config, target_platform};
use crate::cli::ProvisionArgs;
use clustalo_build::builder::BootstrapOutcome;
use clustalo_build::ops::{provision, ProvisionOptions};
use clustalo_build::util::SystemExecutor;

pub fn execute(args: ProvisionArgs) -> Result<()> {
    let ctx = context()?;
    let mut config = load_effective_config(&ctx, &args.platform);

    if args.skip_bootstrap {
        config.bootstrap.skip = Some(true);
    }
    if args.force {
        config.bootstrap.force = Some(true);
    }
    if args.no_sudo {
        config.bootstrap.use_sudo = Some(false);
    }
    if let Some(archive) = args.archive {
        config.bootstrap.archive = Some(archive);
    }

    let options =
        ProvisionOptions::from_config(&config, ctx.cwd(), target_platform(&args.platform));
    let report = provision(&SystemExecutor, options)?;

    match &report.bootstrap {
        Some(BootstrapOutcome::Built) => tracing::info!("Built and installed libclustalo"),
        Some(BootstrapOutcome::AlreadyInstalled(path)) => {
            tracing::info!("Using installed libclustalo at {}", path.display())
        }
        None => {}
    }
    if let Some(reason) = &report.resolution.degraded {
        tracing::info!("Building `{}` without OpenMP: {}", report.descriptor.name, reason);
    }

    let json = report.descriptor.to_json()?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", json))
                .with_context(|| format!("failed to write descriptor: {}", path.display()))?;
            tracing::info!("Wrote build descriptor to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
