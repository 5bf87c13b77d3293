//! # warembed Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads the project manifest (`warembed.toml`) and the optional
//! user configuration, merges them, expands `~` in paths and validates the
//! result. Commands then apply their command-line overrides on top.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (applied by the commands)
//! 2. Project manifest: `--manifest PATH`, or `warembed.toml` found in the
//!    current directory or its ancestors (the search stops at a `.git` directory)
//! 3. User configuration: `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! Relative paths of a manifest are resolved against the manifest's directory.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! if cfg.is_war_packaging() {
//!     return Ok(());
//! }
//! let war = cfg.war_file();
//! let out = cfg.output_file();
//! ```
//!
use crate::common::artifact::coordinate::ArtifactCoordinate;
use crate::common::artifact::locator::ContainerMatcher;
use crate::common::artifact::repository::LocalRepository;
use crate::common::fs::io;
use crate::core::error::{Result, WarembedError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Packaging type for which embedding is skipped.
pub const WAR_PACKAGING: &str = "war";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub embed: EmbedConfig,
    #[serde(default)]
    pub plugin: PluginConfig,
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// Directory relative paths are resolved against. Empty means the
    /// current directory.
    #[serde(skip)]
    pub root: PathBuf,
}

/// Description of the project whose war gets embedded.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Packaging of the project's own output. `war` disables embedding.
    #[serde(default = "default_packaging")]
    pub packaging: String,
    /// Build output directory.
    #[serde(default = "default_build_directory")]
    pub build_directory: String,
    /// Base name of build outputs. Defaults to the project directory name.
    pub final_name: Option<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            packaging: default_packaging(),
            build_directory: default_build_directory(),
            final_name: None,
        }
    }
}

/// Settings of the embed run itself.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct EmbedConfig {
    /// War file to embed. Defaults to `<build_directory>/<final_name>.war`.
    pub war_file: Option<String>,
    /// Standalone jar file name inside the build directory.
    /// Defaults to `<final_name>-standalone.jar`.
    pub filename: Option<String>,
    /// Default command line options of the container.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

/// Dependencies declared for the embedding plugin.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    #[serde(default)]
    pub dependencies: Vec<ArtifactCoordinate>,
    /// Selects the container by exact group and name instead of the name marker.
    pub container: Option<ContainerSelector>,
}

/// Exact container selection.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ContainerSelector {
    pub group: String,
    pub name: String,
}

/// Where artifacts are resolved from.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Local Maven-layout repository. Defaults to `~/.m2/repository`.
    pub local: Option<String>,
}

fn default_packaging() -> String {
    "jar".to_string()
}
fn default_build_directory() -> String {
    "target".to_string()
}

impl Config {
    pub fn is_war_packaging(&self) -> bool {
        self.project.packaging == WAR_PACKAGING
    }

    pub fn final_name(&self) -> &str {
        self.project.final_name.as_deref().unwrap_or("app")
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join(&self.project.build_directory)
    }

    pub fn war_file(&self) -> PathBuf {
        match &self.embed.war_file {
            Some(path) => self.root.join(path),
            None => self.build_dir().join(format!("{}.war", self.final_name())),
        }
    }

    pub fn output_file(&self) -> PathBuf {
        match &self.embed.filename {
            Some(name) => self.build_dir().join(name),
            None => self
                .build_dir()
                .join(format!("{}-standalone.jar", self.final_name())),
        }
    }

    pub fn repository_dir(&self) -> Result<PathBuf> {
        match &self.repository.local {
            Some(local) => Ok(self.root.join(local)),
            None => LocalRepository::default_location().ok_or_else(|| {
                anyhow!(WarembedError::Config(
                    "Could not determine home directory for the default local repository. \
                     Set [repository] local or pass --repository."
                        .to_string()
                ))
            }),
        }
    }

    pub fn container_matcher(&self) -> ContainerMatcher {
        match &self.plugin.container {
            Some(selector) => ContainerMatcher::Exact {
                group: selector.group.clone(),
                name: selector.name.clone(),
            },
            None => ContainerMatcher::default(),
        }
    }
}

const PROJECT_CONFIG_FILENAME: &str = "warembed.toml";

/// Loads, merges, expands and validates the configuration.
///
/// `manifest` replaces the upward search for `warembed.toml` when given.
pub fn load_config(manifest: Option<&Path>) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = match manifest {
        Some(path) => {
            info!("Loading project manifest from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        None => load_project_config()?,
    };
    let mut merged = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged).context("Failed to expand paths in configuration")?;
    fill_final_name(&mut merged)?;
    validate_config(&merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged);
    Ok(merged)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "warembed") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            // User-level relative paths are relative to the working directory.
            let mut cfg = load_config_from_path(&config_path)?;
            cfg.root = std::env::current_dir().context("Failed to get current directory")?;
            Ok(Some(cfg))
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    if let Some(path) = find_project_config_path()? {
        info!("Loading project manifest from: {}", path.display());
        load_config_from_path(&path).map(Some)
    } else {
        debug!("No warembed.toml found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let mut path: &Path = &current_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Ok(Some(project_config));
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping manifest search.",
                path.display()
            );
            return Ok(None);
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => break,
        }
    }
    Ok(None)
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = io::read_file_to_string(path)?;
    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(config)
}

/// Project values win; options are merged key by key.
///
/// The merged config takes the project root, so user paths are first made
/// relative to the user root.
fn merge_configs(mut user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    rebase_user_paths(&mut user);
    let mut options = user.embed.options;
    options.extend(project.embed.options);
    Config {
        repository: RepositoryConfig {
            local: project.repository.local.or(user.repository.local),
        },
        embed: EmbedConfig {
            war_file: project.embed.war_file.or(user.embed.war_file),
            filename: project.embed.filename.or(user.embed.filename),
            options,
        },
        plugin: if project.plugin.dependencies.is_empty() && project.plugin.container.is_none() {
            user.plugin
        } else {
            project.plugin
        },
        project: project.project,
        root: project.root,
    }
}

fn rebase_user_paths(user: &mut Config) {
    let root = &user.root;
    for path in [&mut user.repository.local, &mut user.embed.war_file]
        .into_iter()
        .flatten()
    {
        let expanded = shellexpand::tilde(path.as_str()).into_owned();
        *path = root.join(expanded).to_string_lossy().into_owned();
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    debug!("Expanding paths in configuration...");
    if let Some(local) = &mut config.repository.local {
        *local = shellexpand::tilde(local).into_owned();
        debug!("Expanded local repository: {}", local);
    }
    if let Some(war) = &mut config.embed.war_file {
        *war = shellexpand::tilde(war).into_owned();
    }
    config.project.build_directory = shellexpand::tilde(&config.project.build_directory).into_owned();
    Ok(())
}

/// Defaults `final_name` to the name of the project directory.
fn fill_final_name(config: &mut Config) -> Result<()> {
    if config.project.final_name.is_some() {
        return Ok(());
    }
    let project_dir = if config.root.as_os_str().is_empty() {
        std::env::current_dir().context("Failed to get current directory")?
    } else {
        config.root.clone()
    };
    let name = project_dir
        .canonicalize()
        .unwrap_or(project_dir)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    debug!("Defaulting final name to {:?}", name);
    config.project.final_name = name;
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    if config.project.packaging.is_empty() {
        return Err(anyhow!(WarembedError::Config(
            "Project packaging cannot be empty.".to_string()
        )));
    }
    for dep in &config.plugin.dependencies {
        if dep.group.is_empty() || dep.name.is_empty() || dep.version.is_empty() {
            return Err(anyhow!(WarembedError::Config(format!(
                "Plugin dependency '{}' must have a group, name and version.",
                dep
            ))));
        }
    }
    if let Some(selector) = &config.plugin.container {
        if selector.group.is_empty() || selector.name.is_empty() {
            return Err(anyhow!(WarembedError::Config(
                "[plugin.container] needs both group and name.".to_string()
            )));
        }
    }
    if config.embed.options.keys().any(|k| k.is_empty()) {
        return Err(anyhow!(WarembedError::Config(
            "Command line options cannot have an empty key.".to_string()
        )));
    }
    if let Some(local) = &config.repository.local {
        let repo = config.root.join(local);
        if !repo.exists() {
            warn!("Configured local repository '{}' does not exist.", repo.display());
        } else if !repo.is_dir() {
            return Err(anyhow!(WarembedError::Config(format!(
                "Configured local repository '{}' exists but is not a directory.",
                repo.display()
            ))));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}
