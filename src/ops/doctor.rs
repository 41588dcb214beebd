//! Environment health checks.
//!
//! The `doctor` command reports what `provision` would find on this host
//! without installing or building anything.
//!
//! ## Checks Performed
//!
//! - C compiler and make availability
//! - Package manager availability (brew on macOS, apt on Linux)
//! - argtable system package
//! - OpenMP toolchain (optional; its absence only disables parallel code)
//! - Installed libclustalo, or the source archive to build it from

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::builder::bootstrap::{Bootstrapper, SYSTEM_PACKAGE_MARKER};
use crate::builder::probe::{list_installed, probe};
use crate::builder::{BootstrapOptions, ParallelMode};
use crate::core::flags::ToolFormula;
use crate::core::platform::Platform;
use crate::util::process::CommandExecutor;

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path to the tool or file (if applicable)
    pub path: Option<PathBuf>,

    /// How long the check took
    pub duration: Duration,

    /// Whether this check is required or optional
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            duration: Duration::ZERO,
            required: true,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: false,
            message: message.into(),
            path: None,
            duration: Duration::ZERO,
            required: true,
        }
    }

    /// Mark this check as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set the tool path.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    /// Set the duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,

    /// Total time taken
    pub total_duration: Duration,

    /// Environment information
    pub environment: BTreeMap<String, String>,
}

impl DoctorReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check result.
    pub fn add(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    /// Check if all required checks passed.
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    /// Get the count of passed checks.
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get the count of failed checks.
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    /// Get the count of required failed checks.
    pub fn required_failed_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .count()
    }

    /// Find a check by name.
    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

/// Options for the doctor command.
#[derive(Debug, Clone)]
pub struct DoctorOptions {
    pub platform: Platform,
    pub parallel: ParallelMode,
    pub bootstrap: BootstrapOptions,
}

/// Run every health check.
pub fn doctor(executor: &dyn CommandExecutor, options: &DoctorOptions) -> DoctorReport {
    let start = Instant::now();
    let mut report = DoctorReport::new();

    report
        .environment
        .insert("platform".to_string(), options.platform.to_string());
    report
        .environment
        .insert("arch".to_string(), std::env::consts::ARCH.to_string());

    report.add(timed(|| check_c_compiler(executor)));
    report.add(timed(|| check_make(executor, &options.bootstrap.make)));
    report.add(timed(|| check_package_manager(executor, options.platform)));
    report.add(timed(|| check_system_package(executor, options.platform)));
    report.add(timed(|| check_openmp(executor, options.platform, options.parallel)));

    let bootstrapper = Bootstrapper::new(executor, options.bootstrap.clone());
    let installed = bootstrapper.installed_library();
    report.add(timed(|| check_native_library(installed.clone())));
    report.add(timed(|| {
        check_source_archive(&options.bootstrap, installed.is_some())
    }));

    report.total_duration = start.elapsed();
    report
}

fn timed(check: impl FnOnce() -> CheckResult) -> CheckResult {
    let start = Instant::now();
    let result = check();
    result.with_duration(start.elapsed())
}

fn check_c_compiler(executor: &dyn CommandExecutor) -> CheckResult {
    for compiler in ["cc", "gcc", "clang"] {
        if let Some(path) = executor.find_program(compiler) {
            return CheckResult::pass("C Compiler", format!("Found {}", compiler)).with_path(path);
        }
    }

    CheckResult::fail("C Compiler", "No C compiler found (tried cc, gcc, clang)")
}

fn check_make(executor: &dyn CommandExecutor, make: &str) -> CheckResult {
    match executor.find_program(make) {
        Some(path) => CheckResult::pass("Make", format!("Found {}", make)).with_path(path),
        None => CheckResult::fail("Make", format!("`{}` not found", make)),
    }
}

fn check_package_manager(executor: &dyn CommandExecutor, platform: Platform) -> CheckResult {
    let Some(manager) = platform.package_manager() else {
        return CheckResult::fail(
            "Package Manager",
            format!("No known package manager for `{}`", platform),
        )
        .optional();
    };

    match executor.find_program(manager.program()) {
        Some(path) => {
            CheckResult::pass("Package Manager", format!("Found {}", manager)).with_path(path)
        }
        None => CheckResult::fail("Package Manager", format!("`{}` not found", manager)),
    }
}

fn check_system_package(executor: &dyn CommandExecutor, platform: Platform) -> CheckResult {
    let Some(manager) = platform.package_manager() else {
        return CheckResult::fail("argtable", "Must be installed manually").optional();
    };
    if executor.find_program(manager.program()).is_none() {
        return CheckResult::fail("argtable", format!("Cannot check without {}", manager))
            .optional();
    }

    match list_installed(executor, manager) {
        Ok(listing) if listing.contains(SYSTEM_PACKAGE_MARKER) => {
            CheckResult::pass("argtable", "Installed").optional()
        }
        Ok(_) => CheckResult::fail("argtable", "Not installed; `provision` will install it")
            .optional(),
        Err(e) => CheckResult::fail("argtable", e.to_string()),
    }
}

fn check_openmp(
    executor: &dyn CommandExecutor,
    platform: Platform,
    parallel: ParallelMode,
) -> CheckResult {
    if parallel == ParallelMode::Disabled {
        return CheckResult::pass("OpenMP", "Disabled by configuration").optional();
    }

    let toolchain = ToolFormula::for_platform(platform);
    match probe(executor, toolchain.manager, toolchain.formula) {
        Ok(None) => CheckResult::pass("OpenMP", format!("Found {}", toolchain.formula)).optional(),
        Ok(Some(missing)) => CheckResult::fail(
            "OpenMP",
            format!("{} not found; building without parallel support", missing),
        )
        .optional(),
        Err(e) => CheckResult::fail("OpenMP", e.to_string()),
    }
}

fn check_native_library(installed: Option<PathBuf>) -> CheckResult {
    match installed {
        Some(path) => CheckResult::pass("libclustalo", "Installed")
            .with_path(path)
            .optional(),
        None => CheckResult::fail("libclustalo", "Not installed; `provision` will build it")
            .optional(),
    }
}

fn check_source_archive(options: &BootstrapOptions, library_installed: bool) -> CheckResult {
    let result = if options.archive.is_file() {
        CheckResult::pass("Source Archive", "Found").with_path(options.archive.clone())
    } else {
        CheckResult::fail(
            "Source Archive",
            format!("{} not found", options.archive.display()),
        )
    };

    if library_installed {
        result.optional()
    } else {
        result
    }
}

/// Format a doctor report for display.
pub fn format_report(report: &DoctorReport, verbose: bool) -> String {
    let mut output = String::new();

    output.push_str("clustalo-build doctor\n");
    output.push_str("=====================\n\n");

    if verbose {
        output.push_str("Environment:\n");
        for (key, value) in &report.environment {
            output.push_str(&format!("  {}: {}\n", key, value));
        }
        output.push('\n');
    }

    output.push_str("Checks:\n");
    for check in &report.checks {
        let status = if check.passed { "[OK]" } else { "[!!]" };
        let required = if check.required { "" } else { " (optional)" };

        output.push_str(&format!("  {} {}{}\n", status, check.name, required));

        if verbose {
            output.push_str(&format!("      {}\n", check.message));
            if let Some(path) = &check.path {
                output.push_str(&format!("      Path: {}\n", path.display()));
            }
            output.push_str(&format!("      Took: {:?}\n", check.duration));
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "Summary: {} passed, {} failed ({:?})\n",
        report.passed_count(),
        report.failed_count(),
        report.total_duration
    ));

    let required_failed = report.required_failed_count();
    if required_failed > 0 {
        output.push_str(&format!(
            "\nWarning: {} required check(s) failed. `provision` will not succeed.\n",
            required_failed
        ));
    }

    output
}
