//! # warembed Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! This module groups everything that touches jar/zip files: building the
//! standalone jar, the `embedded.properties` text format, reading a produced
//! jar back, and closing archive handles without masking earlier errors.
//!
//! ## Architecture
//!
//! - **`embed`**: The merge itself. Copies the container jar entries raw,
//!   appends `embedded.war` and the optional `embedded.properties`.
//! - **`properties`**: Writer and reader for the `java.util.Properties` text
//!   format used by the options payload.
//! - **`inspect`**: Lists the entries of a produced jar and decodes its options.
//! - **`release`**: Best-effort close of archive readers and writers.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::embed::{self, EmbeddingPlan};
//!
//! let summary = embed::embed(&EmbeddingPlan {
//!     container: container_jar,
//!     application: war_file,
//!     options,
//!     destination,
//! })?;
//! println!("{} container entries copied", summary.container_entries);
//! ```
//!

pub mod embed;
pub mod inspect;
pub mod properties;
pub mod release;
