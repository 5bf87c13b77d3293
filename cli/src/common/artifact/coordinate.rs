//! # Artifact Coordinates (`common::artifact::coordinate`)
//!
//! File: cli/src/common/artifact/coordinate.rs
//!
//! ## Overview
//!
//! An `ArtifactCoordinate` identifies one resolvable artifact by group, name,
//! version, type and classifier, the same tuple a Maven repository uses.
//! Coordinates are deserialized from `[[plugin.dependencies]]` entries of the
//! project manifest and are never mutated after construction.
//!
use serde::Deserialize;
use std::fmt;

/// Packaging type used when a dependency does not declare one.
pub const DEFAULT_TYPE: &str = "jar";

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

/// Identifies a dependency artifact for resolution purposes.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ArtifactCoordinate {
    /// Group identifier, dot separated (e.g. `net.sourceforge.winstone`).
    pub group: String,
    /// Artifact identifier (e.g. `winstone`).
    pub name: String,
    pub version: String,
    /// Artifact type; decides the file extension. Defaults to `jar`.
    #[serde(default = "default_type", rename = "type")]
    pub kind: String,
    /// Optional classifier; empty means none.
    #[serde(default)]
    pub classifier: String,
}

impl ArtifactCoordinate {
    /// Builds a coordinate of type `jar` without classifier.
    pub fn new(group: &str, name: &str, version: &str) -> Self {
        Self {
            group: group.to_string(),
            name: name.to_string(),
            version: version.to_string(),
            kind: default_type(),
            classifier: String::new(),
        }
    }

    /// File extension of the artifact, derived from its type.
    ///
    /// Types that are packaged as plain jars map to `jar`; any other type is
    /// used as the extension unchanged (`war`, `zip`, ...).
    pub fn extension(&self) -> &str {
        match self.kind.as_str() {
            "" | "test-jar" | "ejb" | "ejb-client" | "maven-plugin" | "java-source"
            | "javadoc" => "jar",
            other => other,
        }
    }

    /// File name of the artifact inside its repository directory:
    /// `<name>-<version>[-<classifier>].<extension>`.
    pub fn file_name(&self) -> String {
        if self.classifier.is_empty() {
            format!("{}-{}.{}", self.name, self.version, self.extension())
        } else {
            format!(
                "{}-{}-{}.{}",
                self.name,
                self.version,
                self.classifier,
                self.extension()
            )
        }
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.kind)?;
        if !self.classifier.is_empty() {
            write!(f, ":{}", self.classifier)?;
        }
        write!(f, ":{}", self.version)
    }
}
