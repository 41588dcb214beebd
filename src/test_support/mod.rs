//! Test utilities and mocks for clustalo-build unit tests.
//!
//! [`MockExecutor`] stands in for the host's package managers and build
//! tools: programs are "on PATH" only when registered, and commands return
//! canned output matched by pattern.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut exec = MockExecutor::new();
//! exec.add_program("brew")
//!     .expect("brew list", MockProcessOutput::success("libomp\n"));
//!
//! let missing = probe(&exec, PackageManager::Homebrew, "libomp")?;
//! assert_eq!(exec.calls(), vec!["brew list"]);
//! ```

pub mod fixtures;
pub mod logging;

use std::collections::HashSet;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::util::process::{CommandExecutor, CommandOutput, ProcessBuilder};

pub use fixtures::*;
pub use logging::capture_warnings;

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    fn to_output(&self) -> CommandOutput {
        CommandOutput {
            status: Some(self.status),
            stdout: self.stdout.clone(),
            stderr: self.stderr.clone(),
        }
    }
}

/// Pattern for matching commands in MockExecutor.
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command contains substring.
    Contains(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::Contains(s) => cmd.contains(s),
        }
    }
}

#[derive(Debug)]
struct CommandExpectation {
    pattern: CommandPattern,
    output: MockProcessOutput,
}

#[derive(Debug, Default)]
struct Recorded {
    calls: Vec<String>,
    cwds: Vec<Option<PathBuf>>,
}

/// Mock process executor for testing command execution.
///
/// Commands with no matching expectation fail to spawn, which surfaces any
/// unplanned subprocess in a test as an error.
#[derive(Debug, Default)]
pub struct MockExecutor {
    programs: HashSet<String>,
    expectations: Vec<CommandExpectation>,
    recorded: Mutex<Recorded>,
}

impl MockExecutor {
    /// Create a new mock executor with an empty PATH.
    pub fn new() -> Self {
        MockExecutor::default()
    }

    /// Make a program resolvable on the mock PATH.
    pub fn add_program(&mut self, name: &str) -> &mut Self {
        self.programs.insert(name.to_string());
        self
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&mut self, cmd: &str, output: MockProcessOutput) -> &mut Self {
        self.expectations.push(CommandExpectation {
            pattern: CommandPattern::Exact(cmd.to_string()),
            output,
        });
        self
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&mut self, substring: &str, output: MockProcessOutput) -> &mut Self {
        self.expectations.push(CommandExpectation {
            pattern: CommandPattern::Contains(substring.to_string()),
            output,
        });
        self
    }

    /// Get all commands that were executed, in order.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Working directories of the executed commands, in call order.
    pub fn cwds(&self) -> Vec<Option<PathBuf>> {
        self.lock().cwds.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.recorded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CommandExecutor for MockExecutor {
    fn find_program(&self, name: &str) -> Option<PathBuf> {
        self.programs
            .contains(name)
            .then(|| PathBuf::from("/mock/bin").join(name))
    }

    fn execute(&self, cmd: &ProcessBuilder) -> io::Result<CommandOutput> {
        let full_cmd = cmd.display_command();

        {
            let mut recorded = self.lock();
            recorded.calls.push(full_cmd.clone());
            recorded.cwds.push(cmd.get_cwd().map(|p| p.to_path_buf()));
        }

        self.expectations
            .iter()
            .find(|exp| exp.pattern.matches(&full_cmd))
            .map(|exp| exp.output.to_output())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("unexpected command: {}", full_cmd),
                )
            })
    }
}
