//! # Artifact Resolution (`common::artifact::repository`)
//!
//! File: cli/src/common/artifact/repository.rs
//!
//! ## Overview
//!
//! Resolution turns an `ArtifactCoordinate` into a path on the local disk. The
//! locator only depends on the narrow `ArtifactResolver` trait, so tests (and
//! future resolvers that download from a remote repository) can plug in
//! without touching the selection logic.
//!
//! `LocalRepository` is the resolver shipped with warembed: it reads a
//! Maven-layout local repository (`~/.m2/repository` unless configured
//! otherwise). It only computes where the artifact lives; whether the file is
//! actually present is checked by the locator.
//!
//! ```text
//! <base>/net/sourceforge/winstone/winstone/0.9.6/winstone-0.9.6.jar
//!        \____ group ___________/ \_name_/ \ver/ \__ file_name __/
//! ```
//!
use super::coordinate::ArtifactCoordinate;
use crate::core::error::{Result, WarembedError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Capability that maps a coordinate to a local file path.
pub trait ArtifactResolver {
    /// Returns the local path of `coordinate`, or an error if it cannot be resolved.
    /// The returned path is not guaranteed to exist.
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<PathBuf>;
}

/// Resolver backed by a Maven-layout local repository directory.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    base_dir: PathBuf,
}

impl LocalRepository {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The conventional per-user repository, `~/.m2/repository`.
    pub fn default_location() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".m2").join("repository"))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Relative path of `coordinate` inside the repository.
    pub fn path_of(coordinate: &ArtifactCoordinate) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in coordinate.group.split('.') {
            path.push(segment);
        }
        path.push(&coordinate.name);
        path.push(&coordinate.version);
        path.push(coordinate.file_name());
        path
    }
}

impl ArtifactResolver for LocalRepository {
    fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<PathBuf> {
        if coordinate.group.is_empty() || coordinate.name.is_empty() {
            anyhow::bail!(WarembedError::Config(format!(
                "Cannot resolve incomplete coordinate '{}'",
                coordinate
            )));
        }
        let path = self.base_dir.join(Self::path_of(coordinate));
        debug!("Resolved {} to {}", coordinate, path.display());
        Ok(path)
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_of_uses_maven_layout() {
        let coord = ArtifactCoordinate::new("net.sourceforge.winstone", "winstone", "0.9.6");
        assert_eq!(
            LocalRepository::path_of(&coord),
            Path::new("net/sourceforge/winstone/winstone/0.9.6/winstone-0.9.6.jar")
        );
    }

    #[test]
    fn test_resolve_joins_base_dir() -> Result<()> {
        let repo = LocalRepository::new("/repo");
        let coord = ArtifactCoordinate {
            classifier: "lite".into(),
            ..ArtifactCoordinate::new("org.example", "container", "1.0")
        };
        let path = repo.resolve(&coord)?;
        assert_eq!(
            path,
            Path::new("/repo/org/example/container/1.0/container-1.0-lite.jar")
        );
        assert_eq!(repo.base_dir(), Path::new("/repo"));
        Ok(())
    }

    #[test]
    fn test_resolve_rejects_empty_group() {
        let repo = LocalRepository::new("/repo");
        let coord = ArtifactCoordinate::new("", "winstone", "1.0");
        assert!(repo.resolve(&coord).is_err());
    }
}
