//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use clustalo_build::core::Platform;

/// clustalo-build - provision libclustalo and resolve extension build flags
#[derive(Parser)]
#[command(name = "clustalo-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install libclustalo if needed and emit the build descriptor
    Provision(ProvisionArgs),

    /// Show compile/link flags for the extension module
    Flags(FlagsArgs),

    /// Check the host for everything provisioning needs
    Doctor(DoctorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that resolves OpenMP flags.
#[derive(Args)]
pub struct PlatformArgs {
    /// Platform to resolve for (macos, linux, other); defaults to the host
    #[arg(long)]
    pub platform: Option<Platform>,

    /// Build without OpenMP (same as setting OPENMP_DISABLED)
    #[arg(long)]
    pub no_openmp: bool,
}

#[derive(Args)]
pub struct ProvisionArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Do not install argtable or build libclustalo
    #[arg(long)]
    pub skip_bootstrap: bool,

    /// Rebuild libclustalo even if it is already installed
    #[arg(long)]
    pub force: bool,

    /// Path to the libclustalo source tarball
    #[arg(long)]
    pub archive: Option<PathBuf>,

    /// Run apt and `make install` without sudo
    #[arg(long)]
    pub no_sudo: bool,

    /// Write the descriptor to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct FlagsArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Show compile flags only
    #[arg(long, conflicts_with = "link")]
    pub compile: bool,

    /// Show link flags only
    #[arg(long)]
    pub link: bool,

    /// Print the full build descriptor as JSON
    #[arg(long, conflicts_with_all = ["compile", "link"])]
    pub json: bool,
}

#[derive(Args)]
pub struct DoctorArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
