//! # Standalone Jar Embedding (`common::archive::embed`)
//!
//! File: cli/src/common/archive/embed.rs
//!
//! ## Overview
//!
//! Builds the standalone jar: every entry of the servlet container jar, then
//! the web application under `embedded.war`, then (optionally) the default
//! command line options under `embedded.properties`. The container's bootstrap
//! code looks for exactly these two names at startup.
//!
//! ## Architecture
//!
//! `embed` runs four phases in a fixed order:
//!
//! 1. **CopyContainer**: container entries are cloned with
//!    `ZipWriter::raw_copy_file`, so compressed bytes, timestamps and extra
//!    fields reach the destination untouched.
//! 2. **AppendApplication**: the war file is streamed into `embedded.war`.
//! 3. **AppendConfiguration**: skipped when there are no options.
//! 4. **Finalize**: the central directory is written.
//!
//! The reserved entries are written last and therefore win: a container entry
//! carrying a name this run is about to write is not copied. When any phase
//! fails, the destination writer is released best-effort and the original
//! error is returned; the file left on disk is partial and must not be used.
//!
use super::properties;
use super::release::release;
use crate::core::error::{EmbedPhase, Result, WarembedError};
use anyhow::Context;
use chrono::{Datelike, Local, Timelike};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Entry name the bootstrap code unpacks as the web application.
pub const EMBEDDED_WAR: &str = "embedded.war";
/// Entry name the bootstrap code loads as default command line options.
pub const EMBEDDED_PROPERTIES: &str = "embedded.properties";
/// Header comment of the `embedded.properties` payload.
pub const OPTIONS_COMMENT: &str = "embedded command line options for winstone";

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Everything one embedding run consumes.
#[derive(Debug, Clone)]
pub struct EmbeddingPlan {
    /// Servlet container jar whose entries are copied.
    pub container: PathBuf,
    /// Web application archive stored as `embedded.war`.
    pub application: PathBuf,
    /// Default command line options; empty means no `embedded.properties`.
    pub options: BTreeMap<String, String>,
    /// Standalone jar to create. Its parent directory must exist.
    pub destination: PathBuf,
}

impl EmbeddingPlan {
    /// Names this run writes after the container entries.
    fn reserved_names(&self) -> Vec<&'static str> {
        if self.options.is_empty() {
            vec![EMBEDDED_WAR]
        } else {
            vec![EMBEDDED_WAR, EMBEDDED_PROPERTIES]
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSummary {
    pub destination: PathBuf,
    /// Container entries copied to the destination.
    pub container_entries: usize,
    /// Container entries dropped because a reserved entry replaces them.
    pub shadowed_entries: usize,
    /// Size of the embedded application archive.
    pub application_bytes: u64,
    pub options_embedded: bool,
}

/// Produces the standalone jar described by `plan`.
///
/// # Errors
///
/// `WarembedError::Embed` naming the failed phase for any open, read or write
/// failure. The destination may exist afterwards but is incomplete.
pub fn embed(plan: &EmbeddingPlan) -> Result<EmbedSummary> {
    check_destination(plan)?;
    let file = File::create(&plan.destination)
        .map_err(|e| WarembedError::embed(EmbedPhase::Start, e))
        .with_context(|| format!("Cannot create {}", plan.destination.display()))?;
    let mut writer = ZipWriter::new(BufWriter::new(file));

    match write_entries(&mut writer, plan) {
        Ok(summary) => {
            let mut inner = writer
                .finish()
                .map_err(|e| WarembedError::embed(EmbedPhase::Finalize, e))?;
            inner
                .flush()
                .map_err(|e| WarembedError::embed(EmbedPhase::Finalize, e))?;
            info!("{} created", plan.destination.display());
            Ok(summary)
        }
        Err(e) => {
            release(writer, "destination archive");
            Err(e)
        }
    }
}

/// Rejects a destination that is one of the inputs, before it gets truncated.
fn check_destination(plan: &EmbeddingPlan) -> Result<()> {
    let destination = normalize(&plan.destination);
    for (input, role) in [
        (&plan.application, "application archive"),
        (&plan.container, "container archive"),
    ] {
        if normalize(input) == destination {
            let reason = io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "destination {} is also the {}",
                    plan.destination.display(),
                    role
                ),
            );
            return Err(WarembedError::embed(EmbedPhase::Start, reason).into());
        }
    }
    Ok(())
}

/// Canonical form of `path`; for a file that does not exist yet, its
/// canonical parent joined with the file name.
fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            parent
                .canonicalize()
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

fn write_entries<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    plan: &EmbeddingPlan,
) -> Result<EmbedSummary> {
    let reserved = plan.reserved_names();
    let (container_entries, shadowed_entries) =
        copy_container(writer, &plan.container, &reserved)?;
    let application_bytes = append_application(writer, &plan.application)?;
    let options_embedded = append_options(writer, &plan.options)?;
    Ok(EmbedSummary {
        destination: plan.destination.clone(),
        container_entries,
        shadowed_entries,
        application_bytes,
        options_embedded,
    })
}

fn copy_container<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    container: &Path,
    reserved: &[&str],
) -> Result<(usize, usize)> {
    info!("Using container file: {}", container.display());
    let file = File::open(container)
        .map_err(|e| WarembedError::embed(EmbedPhase::CopyContainer, e))
        .with_context(|| format!("Cannot open container archive {}", container.display()))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|e| WarembedError::embed(EmbedPhase::CopyContainer, e))
        .with_context(|| format!("Cannot read container archive {}", container.display()))?;

    let outcome = clone_entries(writer, &mut archive, reserved);
    release(archive, "container archive");
    outcome
}

fn clone_entries<W: Write + Seek, R: Read + Seek>(
    writer: &mut ZipWriter<W>,
    archive: &mut ZipArchive<R>,
    reserved: &[&str],
) -> Result<(usize, usize)> {
    let mut copied = 0;
    let mut shadowed = 0;
    for index in 0..archive.len() {
        let entry = archive
            .by_index_raw(index)
            .map_err(|e| WarembedError::embed(EmbedPhase::CopyContainer, e))?;
        if reserved.contains(&entry.name()) {
            warn!(
                "Container entry '{}' is replaced by the embedded one",
                entry.name()
            );
            shadowed += 1;
            continue;
        }
        debug!("Copying entry: {}", entry.name());
        let name = entry.name().to_string();
        writer
            .raw_copy_file(entry)
            .map_err(|e| WarembedError::embed(EmbedPhase::CopyContainer, e))
            .with_context(|| format!("Cannot copy container entry '{}'", name))?;
        copied += 1;
    }
    Ok((copied, shadowed))
}

fn append_application<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    application: &Path,
) -> Result<u64> {
    info!("Using war file: {}", application.display());
    let fail = |e: io::Error| WarembedError::embed(EmbedPhase::AppendApplication, e);
    let file = File::open(application)
        .map_err(fail)
        .with_context(|| format!("Cannot open application archive {}", application.display()))?;
    let size = file.metadata().map_err(fail)?.len();

    let options = entry_options().large_file(size >= u64::from(u32::MAX));
    writer
        .start_file(EMBEDDED_WAR, options)
        .map_err(|e| WarembedError::embed(EmbedPhase::AppendApplication, e))?;
    let mut reader = BufReader::with_capacity(COPY_BUFFER_SIZE, file);
    let written = io::copy(&mut reader, writer)
        .map_err(fail)
        .with_context(|| format!("Cannot stream {}", application.display()))?;
    debug!("Embedded {} bytes as {}", written, EMBEDDED_WAR);
    Ok(written)
}

fn append_options<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    options: &BTreeMap<String, String>,
) -> Result<bool> {
    if options.is_empty() {
        info!("No command line options to embed");
        return Ok(false);
    }
    let text = properties::store(options, OPTIONS_COMMENT, &Local::now());
    writer
        .start_file(EMBEDDED_PROPERTIES, entry_options())
        .map_err(|e| WarembedError::embed(EmbedPhase::AppendConfiguration, e))?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| WarembedError::embed(EmbedPhase::AppendConfiguration, e))?;
    debug!("Embedded {} option(s) as {}", options.len(), EMBEDDED_PROPERTIES);
    Ok(true)
}

/// Options for entries created by warembed: deflated, stamped with the local time.
fn entry_options() -> SimpleFileOptions {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let now = Local::now();
    let year = u16::try_from(now.year()).unwrap_or(1980);
    match zip::DateTime::from_date_and_time(
        year,
        now.month() as u8,
        now.day() as u8,
        now.hour() as u8,
        now.minute() as u8,
        now.second() as u8,
    ) {
        Ok(stamp) => options.last_modified_time(stamp),
        Err(_) => options,
    }
}
