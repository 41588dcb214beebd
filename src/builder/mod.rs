//! Host probing, native bootstrap, and flag resolution.
//!
//! The pipeline runs once per invocation, strictly in order:
//! 1. Ensure the argtable system package and libclustalo are installed
//! 2. Probe for the OpenMP toolchain and resolve compiler/linker flags
//!
//! Nothing here terminates the process; every failure is returned as a
//! [`ProvisionError`].

pub mod archive;
pub mod bootstrap;
pub mod errors;
pub mod probe;
pub mod resolver;

pub use bootstrap::{BootstrapOptions, BootstrapOutcome, Bootstrapper};
pub use errors::ProvisionError;
pub use probe::{probe, MissingItem};
pub use resolver::{DegradeReason, FlagResolver, ParallelMode, Resolution};

use crate::util::process::{CommandExecutor, CommandOutput, ProcessBuilder};

/// Run a command and require a zero exit status.
pub(crate) fn run_checked(
    executor: &dyn CommandExecutor,
    cmd: &ProcessBuilder,
) -> Result<CommandOutput, ProvisionError> {
    let command = cmd.display_command();
    tracing::debug!("running `{}`", command);

    let output = executor
        .execute(cmd)
        .map_err(|source| ProvisionError::Spawn {
            command: command.clone(),
            source,
        })?;

    if !output.success() {
        return Err(ProvisionError::CommandFailed {
            command,
            status: output.status,
            stderr: output.stderr,
        });
    }

    Ok(output)
}
