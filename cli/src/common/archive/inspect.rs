//! # Standalone Jar Inspection (`common::archive::inspect`)
//!
//! File: cli/src/common/archive/inspect.rs
//!
//! Reads back an archive produced by `embed`: lists its entries and decodes
//! the embedded command line options, if any. Backs `warembed inspect`.
//!
use super::embed::{EMBEDDED_PROPERTIES, EMBEDDED_WAR};
use super::properties;
use super::release::release;
use crate::core::error::{Result, WarembedError};
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One entry of an inspected archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub size: u64,
    pub compressed_size: u64,
}

/// Contents of an inspected archive.
#[derive(Debug, Clone, Default)]
pub struct ArchiveListing {
    pub entries: Vec<EntryInfo>,
    /// Decoded `embedded.properties`, when present.
    pub options: Option<BTreeMap<String, String>>,
}

impl ArchiveListing {
    pub fn has_application(&self) -> bool {
        self.entries.iter().any(|e| e.name == EMBEDDED_WAR)
    }
}

pub fn inspect(path: &Path) -> Result<ArchiveListing> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))
        .map_err(WarembedError::from)
        .with_context(|| format!("Cannot read archive {}", path.display()))?;

    let outcome = read_listing(&mut archive);
    release(archive, "inspected archive");
    outcome
}

fn read_listing<R: Read + std::io::Seek>(archive: &mut zip::ZipArchive<R>) -> Result<ArchiveListing> {
    let mut listing = ArchiveListing::default();
    for index in 0..archive.len() {
        let entry = archive.by_index(index).map_err(WarembedError::from)?;
        listing.entries.push(EntryInfo {
            name: entry.name().to_string(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
        });
    }
    if listing.entries.iter().any(|e| e.name == EMBEDDED_PROPERTIES) {
        let mut text = String::new();
        archive
            .by_name(EMBEDDED_PROPERTIES)
            .map_err(WarembedError::from)?
            .read_to_string(&mut text)
            .with_context(|| format!("Cannot read {}", EMBEDDED_PROPERTIES))?;
        listing.options = Some(properties::load(&text)?);
    }
    Ok(listing)
}
