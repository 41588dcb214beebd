//! Provisioning error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal error while probing the host or bootstrapping libclustalo.
///
/// A missing OpenMP toolchain is not an error; it degrades the flag set.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("failed to run `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with {}{}", describe_status(.status), describe_stderr(.stderr))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("could not list installed packages with `{command}`: {reason}")]
    ListingFailed { command: String, reason: String },

    #[error("source archive not found: {}", .path.display())]
    ArchiveNotFound { path: PathBuf },

    #[error("failed to unpack source archive {}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no `configure` script found under {}", .dir.display())]
    ConfigureNotFound { dir: PathBuf },

    #[error("failed to create temporary build directory")]
    TempDir(#[source] io::Error),
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Keeps the tail of stderr, where build tools print the actual failure.
fn describe_stderr(stderr: &str) -> String {
    const MAX_LINES: usize = 20;

    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let start = lines.len().saturating_sub(MAX_LINES);
    format!("\n{}", lines[start..].join("\n"))
}
