//! # Best-Effort Release of Archive Handles (`common::archive::release`)
//!
//! File: cli/src/common/archive/release.rs
//!
//! ## Overview
//!
//! When an embedding run has already failed, the open archive handles still
//! have to be closed, but a failure while closing must not replace the error
//! that aborted the run. `Release` is the fallible close of a handle;
//! `release` is the cleanup entry point, which returns `()` and only logs.
//!
use std::io::{self, Read, Seek, Write};
use tracing::{debug, warn};
use zip::{ZipArchive, ZipWriter};

/// A handle that can be closed, reporting close failures.
pub trait Release {
    fn release(self) -> io::Result<()>;
}

impl<W: Write + Seek> Release for ZipWriter<W> {
    /// Writes the central directory and flushes the underlying writer.
    fn release(self) -> io::Result<()> {
        let mut inner = self.finish().map_err(io::Error::from)?;
        inner.flush()
    }
}

impl<R: Read + Seek> Release for ZipArchive<R> {
    fn release(self) -> io::Result<()> {
        drop(self.into_inner());
        Ok(())
    }
}

/// Closes `handle`, logging (and discarding) any failure.
pub fn release<H: Release>(handle: H, what: &str) {
    match handle.release() {
        Ok(()) => debug!("Released {}", what),
        Err(e) => warn!("Failed to close {}: {}", what, e),
    }
}
