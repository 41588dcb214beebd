//! clustalo-build CLI - provisions libclustalo and resolves extension build flags

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Logs go to stderr so descriptors on stdout stay machine-readable
    let filter = if cli.verbose {
        EnvFilter::new("clustalo_build=debug")
    } else {
        EnvFilter::new("clustalo_build=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Provision(args) => commands::provision::execute(args),
        Commands::Flags(args) => commands::flags::execute(args),
        Commands::Doctor(args) => commands::doctor::execute(args, cli.verbose),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
