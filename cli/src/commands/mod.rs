//! # warembed Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Each top-level command lives in its own module, defining a clap argument
//! struct and a `handle_*` function that `main.rs` dispatches to.
//!
//! ## Commands
//!
//! - `embed`: Build the standalone jar (container + war + options)
//! - `locate`: Show which container jar would be embedded
//! - `inspect`: List a standalone jar and decode its embedded options
//!

/// Builds the standalone jar.
pub mod embed;
/// Inspects a produced standalone jar.
pub mod inspect;
/// Resolves the container jar without building anything.
pub mod locate;
