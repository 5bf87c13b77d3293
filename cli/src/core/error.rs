//! # warembed Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout warembed. Domain
//! failures are variants of `WarembedError` (derived with `thiserror`), while
//! propagation across the application uses `anyhow::Result` so that call sites
//! can attach path-bearing context with `anyhow::Context`.
//!
//! ## Architecture
//!
//! - `WarembedError`: the specific failure kinds a user can hit
//!   (configuration, filesystem, unresolved container artifact, embedding I/O).
//! - `EmbedPhase`: which step of an embedding run failed, carried by
//!   `WarembedError::Embed` so the message says where the archive broke.
//! - `Result<T>`: alias for `anyhow::Result<T>`.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! anyhow::bail!(WarembedError::ArtifactNotFound {
//!     tried: "net.sourceforge.winstone:winstone:jar:0.9.6".into(),
//! });
//!
//! // Detect it further up
//! if let Some(WarembedError::ArtifactNotFound { .. }) = err.downcast_ref::<WarembedError>() {
//!     // nothing was written
//! }
//! ```
//!
use std::fmt;
use thiserror::Error;

/// Boxed underlying cause of an embedding failure (I/O or zip error).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The step of an embedding run in which an I/O failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedPhase {
    /// Creating the destination file.
    Start,
    /// Cloning the container archive entries.
    CopyContainer,
    /// Streaming the application archive into `embedded.war`.
    AppendApplication,
    /// Writing `embedded.properties`.
    AppendConfiguration,
    /// Writing the central directory and flushing the destination.
    Finalize,
}

impl fmt::Display for EmbedPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EmbedPhase::Start => "opening destination archive",
            EmbedPhase::CopyContainer => "copying container entries",
            EmbedPhase::AppendApplication => "appending application archive",
            EmbedPhase::AppendConfiguration => "appending command line options",
            EmbedPhase::Finalize => "finalizing destination archive",
        };
        f.write_str(label)
    }
}

/// Custom error type for warembed.
#[derive(Error, Debug)]
pub enum WarembedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Invalid command line option '{0}'. Expected KEY=VALUE.")]
    InvalidOption(String),

    #[error(
        "Container artifact not found, please declare it in the plugin dependencies (tried: {tried})"
    )]
    ArtifactNotFound { tried: String },

    #[error("Embedding failed while {phase}: {source}")]
    Embed {
        phase: EmbedPhase,
        #[source]
        source: BoxError,
    },

    #[error("Archive error: {source}")]
    Archive {
        #[from]
        source: zip::result::ZipError,
    },
}

impl WarembedError {
    /// Wraps any error as an embedding failure of the given phase.
    pub fn embed(phase: EmbedPhase, source: impl Into<BoxError>) -> Self {
        WarembedError::Embed {
            phase,
            source: source.into(),
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
