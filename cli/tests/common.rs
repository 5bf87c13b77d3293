//! # warembed CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests: locating the compiled binary,
//! writing fixture jars, installing them into a throwaway local repository and
//! reading produced jars back.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Default container location inside a Maven-layout repository.
pub const DEFAULT_CONTAINER_PATH: &str =
    "net/sourceforge/winstone/winstone/0.9.6/winstone-0.9.6.jar";

/// `assert_cmd::Command` for the compiled `warembed` binary.
pub fn warembed_cmd() -> Command {
    Command::cargo_bin("warembed").expect("Failed to find warembed binary for testing")
}

/// Writes a zip archive containing `entries` at `path`, creating parents.
pub fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (name, data) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}

/// Installs a container jar at `relative` inside `repo`.
pub fn install_container(repo: &Path, relative: &str, entries: &[(&str, &[u8])]) -> PathBuf {
    let path = repo.join(relative);
    write_zip(&path, entries);
    path
}

/// Reads every entry of a zip archive, in archive order.
pub fn read_zip(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut entry = archive.by_index(i).unwrap();
            let mut data = Vec::new();
            entry.read_to_end(&mut data).unwrap();
            (entry.name().to_string(), data)
        })
        .collect()
}

/// Minimal `key=value` reader for the plain options used in the tests.
pub fn parse_simple_properties(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Standard container fixture entries.
pub fn container_entries() -> Vec<(&'static str, &'static [u8])> {
    vec![
        ("META-INF/MANIFEST.MF", b"Main-Class: winstone.Launcher\n".as_slice()),
        ("winstone/Launcher.class", b"\xCA\xFE\xBA\xBElauncher".as_slice()),
        ("winstone/default.properties", b"httpPort=8080\n".as_slice()),
    ]
}
