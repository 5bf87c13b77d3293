//! # warembed Locate Command
//!
//! File: cli/src/commands/locate/mod.rs
//!
//! ## Overview
//!
//! `warembed locate` prints which servlet container jar an `embed` run would
//! use, without writing anything. Useful to check that a redeclared container
//! dependency is actually picked up from the local repository.
//!
//! ```bash
//! warembed locate
//! warembed locate --repository ./offline-repo --manifest demo/warembed.toml
//! ```
//!
use crate::common::artifact::locator::{self, ResolvedFile};
use crate::common::artifact::repository::LocalRepository;
use crate::core::config::{self, Config};
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments of `warembed locate`.
#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Project manifest to use instead of searching for `warembed.toml`.
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Local Maven-layout repository (overrides `[repository] local`).
    #[arg(short, long, env = "WAREMBED_REPOSITORY")]
    repository: Option<PathBuf>,
}

/// Resolves the container jar for `config`, preferring `repository` over the
/// configured local repository.
pub(crate) fn find_container(config: &Config, repository: Option<PathBuf>) -> Result<ResolvedFile> {
    let repo_dir = match repository {
        Some(dir) => dir,
        None => config.repository_dir()?,
    };
    let repo = LocalRepository::new(repo_dir);
    info!("Resolving container from {}", repo.base_dir().display());
    locator::locate(
        &config.plugin.dependencies,
        &locator::default_container(),
        &config.container_matcher(),
        &repo,
    )
}

pub fn handle_locate(args: LocateArgs) -> Result<()> {
    info!("Handling locate command with args: {:?}", args);
    let config = config::load_config(args.manifest.as_deref())?;
    let found = find_container(&config, args.repository)?;
    println!("{}", found.coordinate);
    println!("{}", found.path.display());
    Ok(())
}
