//! # warembed Embed Command
//!
//! File: cli/src/commands/embed/mod.rs
//!
//! ## Overview
//!
//! `warembed embed` builds the standalone jar: the servlet container jar with
//! the project's war file and default command line options embedded in it.
//!
//! ## Flow
//!
//! 1. Load the configuration and apply command-line overrides.
//! 2. Stop successfully, without writing anything, when the project packaging
//!    is `war`.
//! 3. Locate the container jar. A missing container aborts before any output
//!    file exists.
//! 4. Create the build directory and run the embedding.
//!
//! ```bash
//! warembed embed
//! warembed embed --war target/shop.war --output shop.jar -D httpPort=9090 -D prefix=/shop
//! ```
//!
use super::locate::find_container;
use crate::common::archive::embed::{self, EmbeddingPlan};
use crate::common::fs::io;
use crate::core::config;
use crate::core::error::{Result, WarembedError};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// Arguments of `warembed embed`.
#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// Project manifest to use instead of searching for `warembed.toml`.
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Packaging of the project output (overrides `[project] packaging`).
    /// Embedding is skipped for `war`.
    #[arg(long)]
    packaging: Option<String>,

    /// War file to embed (overrides `[embed] war_file`).
    #[arg(short, long)]
    war: Option<PathBuf>,

    /// Standalone jar to create (overrides the build directory default).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Local Maven-layout repository (overrides `[repository] local`).
    #[arg(short, long, env = "WAREMBED_REPOSITORY")]
    repository: Option<PathBuf>,

    /// Default container command line option, KEY=VALUE. Repeatable; wins
    /// over `[embed.options]` for the same key.
    #[arg(short = 'D', long = "option", value_parser = parse_option)]
    options: Vec<(String, String)>,
}

/// Parses one `KEY=VALUE` option. The value may itself contain `=`.
fn parse_option(raw: &str) -> std::result::Result<(String, String), WarembedError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(WarembedError::InvalidOption(raw.to_string())),
    }
}

pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    info!("Handling embed command with args: {:?}", args);
    let mut config = config::load_config(args.manifest.as_deref())?;
    if let Some(packaging) = args.packaging {
        config.project.packaging = packaging;
    }

    if config.is_war_packaging() {
        info!("Embedding only applies when packaging is not 'war'; skipping.");
        println!("Packaging is 'war', nothing to embed.");
        return Ok(());
    }

    let container = find_container(&config, args.repository)?;

    let application = args.war.unwrap_or_else(|| config.war_file());
    let destination = args.output.unwrap_or_else(|| config.output_file());
    let mut options = config.embed.options.clone();
    options.extend(args.options);
    debug!("Embedding {} option(s)", options.len());

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            io::ensure_dir_exists(parent)?;
        }
    }

    let summary = embed::embed(&EmbeddingPlan {
        container: container.path,
        application,
        options,
        destination,
    })?;

    if summary.shadowed_entries > 0 {
        println!(
            "Replaced {} container entries with embedded ones",
            summary.shadowed_entries
        );
    }
    println!(
        "Created {} ({} container entries, {} bytes of application{})",
        summary.destination.display(),
        summary.container_entries,
        summary.application_bytes,
        if summary.options_embedded {
            ", with command line options"
        } else {
            ""
        }
    );
    Ok(())
}
