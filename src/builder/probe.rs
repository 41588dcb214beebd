//! Package manager capability probing.

use std::fmt;

use crate::builder::errors::ProvisionError;
use crate::core::platform::PackageManager;
use crate::util::process::CommandExecutor;

/// The first thing found missing by [`probe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingItem {
    /// The package manager executable is not on `PATH`.
    Tool(String),
    /// The package manager runs but the formula is not installed.
    Formula(String),
}

impl fmt::Display for MissingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingItem::Tool(name) => write!(f, "tool `{}`", name),
            MissingItem::Formula(name) => write!(f, "formula `{}`", name),
        }
    }
}

/// Check that `tool` is on `PATH` and lists `formula` as installed.
///
/// Spawns no process when the tool is missing and exactly one (the listing
/// command) otherwise. A listing command that cannot run or exits non-zero is
/// an error, not a missing formula.
pub fn probe(
    executor: &dyn CommandExecutor,
    tool: PackageManager,
    formula: &str,
) -> Result<Option<MissingItem>, ProvisionError> {
    if executor.find_program(tool.program()).is_none() {
        tracing::debug!("`{}` is not on PATH", tool.program());
        return Ok(Some(MissingItem::Tool(tool.program().to_string())));
    }

    let listing = list_installed(executor, tool)?;
    if !listing.contains(formula) {
        return Ok(Some(MissingItem::Formula(formula.to_string())));
    }

    Ok(None)
}

/// Run the package manager's listing command and return its stdout.
pub fn list_installed(
    executor: &dyn CommandExecutor,
    tool: PackageManager,
) -> Result<String, ProvisionError> {
    let cmd = tool.list_command();
    let command = cmd.display_command();
    tracing::debug!("running `{}`", command);

    let output = executor
        .execute(&cmd)
        .map_err(|e| ProvisionError::ListingFailed {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if !output.success() {
        let reason = match output.status {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };
        let stderr = output.stderr.trim();
        return Err(ProvisionError::ListingFailed {
            command,
            reason: if stderr.is_empty() {
                reason
            } else {
                format!("{}: {}", reason, stderr)
            },
        });
    }

    Ok(output.stdout)
}
