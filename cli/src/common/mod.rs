//! # warembed Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Root of the shared modules used by the commands. Command handlers
//! (`commands::`) stay thin; the merge and resolution logic lives here, next to
//! the generic filesystem helpers.
//!
//! ## Architecture
//!
//! - **`archive`**: Building, inspecting and closing jar files. Includes the
//!   embedding algorithm and the `embedded.properties` codec.
//! - **`artifact`**: Artifact coordinates, the local repository resolver and
//!   the container locator.
//! - **`fs`**: Directory creation and file reading with path-bearing errors.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::{archive, artifact, fs};
//!
//! let repo = artifact::repository::LocalRepository::new(repo_dir);
//! let found = artifact::locator::locate(&deps, &artifact::locator::default_container(), &matcher, &repo)?;
//! fs::io::ensure_dir_exists(build_dir)?;
//! let summary = archive::embed::embed(&plan)?;
//! ```
//!

/// Building and reading jar archives.
pub mod archive;
/// Locating the servlet container artifact.
pub mod artifact;
/// Filesystem operations.
pub mod fs;
