//! # Container Artifact Locator (`common::artifact::locator`)
//!
//! File: cli/src/common/artifact/locator.rs
//!
//! ## Overview
//!
//! Decides which servlet-container jar gets embedded. The build author can
//! override the container version or classifier by redeclaring it among the
//! plugin dependencies; otherwise the built-in default coordinate is used.
//!
//! ## Algorithm
//!
//! 1. Every declared dependency accepted by the `ContainerMatcher` is a
//!    candidate, in declared order.
//! 2. Candidates are resolved one by one; the first whose resolved path exists
//!    on disk wins.
//! 3. Only when no declared candidate produced a file is `default_container()`
//!    resolved.
//! 4. If nothing produced a file, `WarembedError::ArtifactNotFound` is returned.
//!
//! A resolver error aborts the search: it is returned with the failing
//! coordinate as context instead of falling through to the next candidate.
//!
use super::coordinate::ArtifactCoordinate;
use super::repository::ArtifactResolver;
use crate::core::error::{Result, WarembedError};
use anyhow::Context;
use std::path::PathBuf;
use tracing::{debug, info};

/// Substring that marks a dependency as the servlet container.
pub const CONTAINER_MARKER: &str = "winstone";

/// Coordinate embedded when no declared dependency provides the container.
pub fn default_container() -> ArtifactCoordinate {
    ArtifactCoordinate::new("net.sourceforge.winstone", "winstone", "0.9.6")
}

/// Predicate selecting the container artifact among declared dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerMatcher {
    /// Case-sensitive substring match on the artifact name.
    NameContains(String),
    /// Group and name must both be equal.
    Exact { group: String, name: String },
}

impl ContainerMatcher {
    pub fn matches(&self, coordinate: &ArtifactCoordinate) -> bool {
        match self {
            ContainerMatcher::NameContains(marker) => coordinate.name.contains(marker.as_str()),
            ContainerMatcher::Exact { group, name } => {
                coordinate.group == *group && coordinate.name == *name
            }
        }
    }
}

impl Default for ContainerMatcher {
    fn default() -> Self {
        ContainerMatcher::NameContains(CONTAINER_MARKER.to_string())
    }
}

/// A located container archive and the coordinate it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub coordinate: ArtifactCoordinate,
    pub path: PathBuf,
}

/// Finds the container archive to embed.
///
/// # Errors
///
/// `WarembedError::ArtifactNotFound` when neither a matching declared
/// dependency nor `fallback` resolves to an existing file. A resolver failure
/// is returned as is.
pub fn locate(
    declared: &[ArtifactCoordinate],
    fallback: &ArtifactCoordinate,
    matcher: &ContainerMatcher,
    resolver: &dyn ArtifactResolver,
) -> Result<ResolvedFile> {
    let mut tried = Vec::new();

    for candidate in declared.iter().filter(|dep| matcher.matches(dep)) {
        debug!("Declared dependency {} matches the container", candidate);
        if let Some(found) = select(candidate, resolver)? {
            info!("Using declared container artifact {}", candidate);
            return Ok(found);
        }
        tried.push(candidate.to_string());
    }

    if let Some(found) = select(fallback, resolver)? {
        info!("Using default container artifact {}", fallback);
        return Ok(found);
    }
    tried.push(fallback.to_string());

    anyhow::bail!(WarembedError::ArtifactNotFound {
        tried: tried.join(", "),
    })
}

/// Resolves one candidate, keeping it only if the file exists.
fn select(
    coordinate: &ArtifactCoordinate,
    resolver: &dyn ArtifactResolver,
) -> Result<Option<ResolvedFile>> {
    let path = resolver
        .resolve(coordinate)
        .with_context(|| format!("Failed to resolve {}", coordinate))?;
    if !path.exists() {
        debug!("{} resolved to missing file {}", coordinate, path.display());
        return Ok(None);
    }
    Ok(Some(ResolvedFile {
        coordinate: coordinate.clone(),
        path,
    }))
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::artifact::repository::LocalRepository;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    /// Resolver that records every coordinate it was asked for.
    struct RecordingResolver {
        inner: LocalRepository,
        calls: RefCell<Vec<String>>,
    }

    impl ArtifactResolver for RecordingResolver {
        fn resolve(&self, coordinate: &ArtifactCoordinate) -> Result<PathBuf> {
            self.calls.borrow_mut().push(coordinate.to_string());
            self.inner.resolve(coordinate)
        }
    }

    fn install(repo: &LocalRepository, coordinate: &ArtifactCoordinate) -> PathBuf {
        let path = repo.base_dir().join(LocalRepository::path_of(coordinate));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"PK").unwrap();
        path
    }

    #[test]
    fn test_declared_dependency_preferred_over_default() -> Result<()> {
        let temp = tempdir()?;
        let repo = LocalRepository::new(temp.path());
        let declared = ArtifactCoordinate::new("net.sourceforge.winstone", "winstone-lite", "0.9.10");
        let expected = install(&repo, &declared);
        install(&repo, &default_container());

        let deps = vec![
            ArtifactCoordinate::new("org.slf4j", "slf4j-api", "1.7.36"),
            declared.clone(),
        ];
        let found = locate(&deps, &default_container(), &ContainerMatcher::default(), &repo)?;
        assert_eq!(found.path, expected);
        assert_eq!(found.coordinate, declared);
        Ok(())
    }

    #[test]
    fn test_empty_declarations_use_default() -> Result<()> {
        let temp = tempdir()?;
        let repo = LocalRepository::new(temp.path());
        let expected = install(&repo, &default_container());

        let found = locate(&[], &default_container(), &ContainerMatcher::default(), &repo)?;
        assert_eq!(found.path, expected);
        assert_eq!(found.coordinate, default_container());
        Ok(())
    }

    #[test]
    fn test_first_existing_match_wins() -> Result<()> {
        let temp = tempdir()?;
        let resolver = RecordingResolver {
            inner: LocalRepository::new(temp.path()),
            calls: RefCell::new(Vec::new()),
        };
        let missing = ArtifactCoordinate::new("g", "winstone", "9.9");
        let second = ArtifactCoordinate::new("g", "winstone-boot", "1.0");
        let third = ArtifactCoordinate::new("g", "winstone-extra", "1.0");
        let expected = install(&resolver.inner, &second);
        install(&resolver.inner, &third);

        let deps = vec![missing.clone(), second.clone(), third];
        let found = locate(&deps, &default_container(), &ContainerMatcher::default(), &resolver)?;
        assert_eq!(found.path, expected);
        assert_eq!(
            *resolver.calls.borrow(),
            vec![missing.to_string(), second.to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_not_found_when_nothing_exists() {
        let temp = tempdir().unwrap();
        let repo = LocalRepository::new(temp.path());
        let deps = vec![ArtifactCoordinate::new("g", "winstone", "1.0")];

        let err = locate(&deps, &default_container(), &ContainerMatcher::default(), &repo)
            .unwrap_err();
        match err.downcast_ref::<WarembedError>() {
            Some(WarembedError::ArtifactNotFound { tried }) => {
                assert!(tried.contains("g:winstone:jar:1.0"));
                assert!(tried.contains("net.sourceforge.winstone:winstone:jar:0.9.6"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    /// Resolver that fails for every coordinate.
    struct FailingResolver;

    impl ArtifactResolver for FailingResolver {
        fn resolve(&self, _coordinate: &ArtifactCoordinate) -> Result<PathBuf> {
            anyhow::bail!("repository unreachable")
        }
    }

    #[test]
    fn test_resolver_error_aborts_search() {
        let deps = vec![ArtifactCoordinate::new("g", "winstone", "1.0")];
        let err = locate(
            &deps,
            &default_container(),
            &ContainerMatcher::default(),
            &FailingResolver,
        )
        .unwrap_err();

        let message = format!("{:#}", err);
        assert!(message.contains("Failed to resolve g:winstone:jar:1.0"));
        assert!(message.contains("repository unreachable"));
        assert!(err.downcast_ref::<WarembedError>().is_none());
    }

    #[test]
    fn test_marker_match_is_case_sensitive() {
        let matcher = ContainerMatcher::default();
        assert!(matcher.matches(&ArtifactCoordinate::new("g", "my-winstone-fork", "1")));
        assert!(!matcher.matches(&ArtifactCoordinate::new("g", "Winstone", "1")));
    }

    #[test]
    fn test_exact_matcher() {
        let matcher = ContainerMatcher::Exact {
            group: "net.sourceforge.winstone".into(),
            name: "winstone".into(),
        };
        assert!(matcher.matches(&default_container()));
        assert!(!matcher.matches(&ArtifactCoordinate::new(
            "net.sourceforge.winstone",
            "winstone-lite",
            "1"
        )));
    }
}
