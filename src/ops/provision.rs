//! Implementation of `clustalo-build provision`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::builder::{
    BootstrapOptions, BootstrapOutcome, Bootstrapper, FlagResolver, ParallelMode, Resolution,
};
use crate::core::descriptor::{assemble, BuildDescriptor};
use crate::core::platform::Platform;
use crate::util::config::Config;
use crate::util::process::CommandExecutor;

/// Options for the provision pipeline.
#[derive(Debug, Clone)]
pub struct ProvisionOptions {
    /// Platform to provision for
    pub platform: Platform,

    /// Whether OpenMP may be used
    pub parallel: ParallelMode,

    /// Skip installing argtable and libclustalo
    pub skip_bootstrap: bool,

    /// Bootstrap settings
    pub bootstrap: BootstrapOptions,
}

impl ProvisionOptions {
    /// Build options from a loaded config for a project rooted at `project_root`.
    pub fn from_config(config: &Config, project_root: &Path, platform: Platform) -> Self {
        ProvisionOptions {
            platform,
            parallel: config.parallel_mode(),
            skip_bootstrap: config.skip_bootstrap(),
            bootstrap: config.bootstrap_options(project_root),
        }
    }
}

/// Everything the pipeline decided.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    /// `None` when the bootstrap was skipped
    pub bootstrap: Option<BootstrapOutcome>,
    pub resolution: Resolution,
    pub descriptor: BuildDescriptor,
}

/// Bootstrap libclustalo, resolve OpenMP flags, and assemble the descriptor.
///
/// A bootstrap failure returns before any flags are resolved, so no
/// descriptor is ever produced for a half-installed library.
pub fn provision(
    executor: &dyn CommandExecutor,
    options: ProvisionOptions,
) -> Result<ProvisionReport> {
    let ProvisionOptions {
        platform,
        parallel,
        skip_bootstrap,
        bootstrap,
    } = options;

    tracing::info!("Provisioning libclustalo for {}", platform);

    let bootstrap = if skip_bootstrap {
        tracing::info!("Skipping libclustalo bootstrap");
        None
    } else {
        let outcome = Bootstrapper::new(executor, bootstrap)
            .ensure_native_library(platform)
            .context("failed to bootstrap libclustalo")?;
        Some(outcome)
    };

    let resolution = FlagResolver::new(executor, parallel)
        .resolve_detailed(platform)
        .context("failed to resolve OpenMP flags")?;

    let descriptor = assemble(resolution.flags.clone());

    Ok(ProvisionReport {
        bootstrap,
        resolution,
        descriptor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{DegradeReason, MissingItem, ProvisionError};
    use crate::test_support::{write_source_archive, MockExecutor, MockProcessOutput};
    use tempfile::TempDir;

    fn options(tmp: &TempDir, platform: Platform) -> ProvisionOptions {
        ProvisionOptions {
            platform,
            parallel: ParallelMode::Auto,
            skip_bootstrap: false,
            bootstrap: BootstrapOptions {
                archive: write_source_archive(tmp.path()),
                include_dirs: vec![tmp.path().join("include")],
                library_dirs: vec![tmp.path().join("lib")],
                ..BootstrapOptions::default()
            },
        }
    }

    #[test]
    fn test_full_pipeline_macos() {
        let tmp = TempDir::new().unwrap();
        let mut exec = MockExecutor::new();
        exec.add_program("brew")
            .expect("brew list", MockProcessOutput::success("argtable\nlibomp\n"))
            .expect_contains("configure --with-pic", MockProcessOutput::success(""))
            .expect("make", MockProcessOutput::success(""))
            .expect("sudo make install", MockProcessOutput::success(""));

        let report = provision(&exec, options(&tmp, Platform::MacOs)).unwrap();

        assert_eq!(report.bootstrap, Some(BootstrapOutcome::Built));
        assert_eq!(
            report.descriptor.extra_compile_args,
            vec!["-Xpreprocessor", "-fopenmp"]
        );
        assert_eq!(report.descriptor.extra_link_args, vec!["-lomp"]);
        assert_eq!(exec.calls().len(), 5);
        assert_eq!(exec.calls().last().map(String::as_str), Some("brew list"));
    }

    #[test]
    fn test_build_failure_produces_no_descriptor() {
        let tmp = TempDir::new().unwrap();
        let mut exec = MockExecutor::new();
        exec.add_program("apt")
            .expect("apt list --installed", MockProcessOutput::success("libargtable2\n"))
            .expect_contains("configure --with-pic", MockProcessOutput::success(""))
            .expect("make", MockProcessOutput::failure(2, "clustal-omega.c:1: error"));

        let err = provision(&exec, options(&tmp, Platform::Linux)).unwrap_err();

        assert!(format!("{:#}", err).contains("failed to bootstrap libclustalo"));
        assert!(matches!(
            err.downcast_ref::<ProvisionError>(),
            Some(ProvisionError::CommandFailed { status: Some(2), .. })
        ));
        // The OpenMP probe never ran.
        assert_eq!(exec.calls().len(), 3);
    }

    #[test]
    fn test_skip_bootstrap_degraded_linux() {
        let tmp = TempDir::new().unwrap();
        let mut exec = MockExecutor::new();
        exec.add_program("apt")
            .expect("apt list --installed", MockProcessOutput::success("libargtable2\n"));
        let options = ProvisionOptions {
            skip_bootstrap: true,
            ..options(&tmp, Platform::Linux)
        };

        let report = provision(&exec, options).unwrap();

        assert_eq!(report.bootstrap, None);
        assert!(report.descriptor.extra_compile_args.is_empty());
        assert!(report.descriptor.extra_link_args.is_empty());
        assert_eq!(
            report.resolution.degraded,
            Some(DegradeReason::Missing(MissingItem::Formula(
                "libomp-dev".to_string()
            )))
        );
        assert_eq!(exec.calls(), vec!["apt list --installed"]);
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.parallel.disabled = Some(true);
        config.bootstrap.skip = Some(true);

        let options = ProvisionOptions::from_config(&config, Path::new("/p"), Platform::Other);

        assert_eq!(options.platform, Platform::Other);
        assert_eq!(options.parallel, ParallelMode::Disabled);
        assert!(options.skip_bootstrap);
        assert!(!options.bootstrap.openmp);
    }
}
