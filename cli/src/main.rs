//! # warembed Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! warembed turns a web application archive into a single executable jar by
//! embedding it, together with default command line options, into the Winstone
//! servlet container jar. This file handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Build target/<final_name>-standalone.jar from warembed.toml
//! warembed embed
//!
//! # Same, with progress logs
//! warembed -v embed
//!
//! # Check which container jar would be used
//! warembed locate
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to the command handler
//! 4. Print any error and exit with status 1
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (embed, locate, inspect)
mod common; // Archive, artifact and filesystem logic
mod core; // Errors and configuration

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "warembed",
    about = "Embed a war file into the Winstone servlet container jar",
    long_about = "Builds a single self-contained executable jar from a servlet container jar,\n\
                  a web application archive and optional default command line options.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the standalone jar.
    #[command(alias = "e")]
    Embed(commands::embed::EmbedArgs),
    /// Print the container jar that would be embedded.
    #[command(alias = "l")]
    Locate(commands::locate::LocateArgs),
    /// List a standalone jar and its embedded options.
    #[command(alias = "i")]
    Inspect(commands::inspect::InspectArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Embed(args) => commands::embed::handle_embed(args),
        Commands::Locate(args) => commands::locate::handle_locate(args),
        Commands::Inspect(args) => commands::inspect::handle_inspect(args),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
