//! `clustalo-build doctor` command

use anyhow::Result;

use super::{context, load_effective_config, target_platform};
use crate::cli::DoctorArgs;
use clustalo_build::ops::{doctor, format_report, DoctorOptions};
use clustalo_build::util::SystemExecutor;

pub fn execute(args: DoctorArgs, verbose: bool) -> Result<()> {
    let ctx = context()?;
    let config = load_effective_config(&ctx, &args.platform);

    let options = DoctorOptions {
        platform: target_platform(&args.platform),
        parallel: config.parallel_mode(),
        bootstrap: config.bootstrap_options(ctx.cwd()),
    };

    let report = doctor(&SystemExecutor, &options);
    print!("{}", format_report(&report, verbose));

    // Exit with error code if required checks failed
    if !report.all_required_passed() {
        std::process::exit(1);
    }

    Ok(())
}
