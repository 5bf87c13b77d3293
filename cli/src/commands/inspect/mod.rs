//! # warembed Inspect Command
//!
//! File: cli/src/commands/inspect/mod.rs
//!
//! `warembed inspect <ARCHIVE>` lists the entries of a standalone jar, flags
//! the embedded war, and prints the decoded command line options.
//!
use crate::common::archive::embed::{EMBEDDED_PROPERTIES, EMBEDDED_WAR};
use crate::common::archive::inspect;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments of `warembed inspect`.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Standalone jar to inspect.
    archive: PathBuf,
}

pub fn handle_inspect(args: InspectArgs) -> Result<()> {
    info!("Inspecting {}", args.archive.display());
    let listing = inspect::inspect(&args.archive)?;

    for entry in &listing.entries {
        let marker = if entry.name == EMBEDDED_WAR || entry.name == EMBEDDED_PROPERTIES {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:>10} {:>10}  {}",
            marker, entry.size, entry.compressed_size, entry.name
        );
    }
    println!("{} entries", listing.entries.len());
    if !listing.has_application() {
        println!("No {} entry: not a standalone jar.", EMBEDDED_WAR);
    }
    match &listing.options {
        Some(options) => {
            println!("Embedded command line options:");
            for (key, value) in options {
                println!("  {}={}", key, value);
            }
        }
        None => println!("No embedded command line options."),
    }
    Ok(())
}
