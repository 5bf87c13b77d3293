//! # warembed Artifact Resolution Module (`common::artifact`)
//!
//! File: cli/src/common/artifact/mod.rs
//!
//! ## Overview
//!
//! Finds the servlet container jar to embed. Declared plugin dependencies can
//! override the container version; otherwise a built-in default coordinate is
//! resolved from the local repository.
//!
//! ## Architecture
//!
//! - **`coordinate`**: `ArtifactCoordinate` (group, name, version, type, classifier).
//! - **`repository`**: The `ArtifactResolver` capability and its Maven-layout
//!   `LocalRepository` implementation.
//! - **`locator`**: Candidate selection (`ContainerMatcher`), fallback to
//!   `default_container()`, and the existence check.
//!

pub mod coordinate;
pub mod locator;
pub mod repository;
