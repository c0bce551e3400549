//! Configuration: where overlays come from, where the merged tree is built,
//! and where it gets deployed.
pub mod managed;
pub mod toml_loader;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use managed::ManagedNames;

/// Name of the optional configuration file inside the root directory.
pub const CONFIG_FILE_NAME: &str = "modmerge.toml";

/// Resolved configuration passed to every build, deploy and undeploy step.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory the defaults are relative to.
    pub root: PathBuf,
    /// Directory holding overlay folders and `.zip` archives.
    pub mods_dir: PathBuf,
    /// Fully-owned output tree, rebuilt on every build.
    pub output_dir: PathBuf,
    /// Deployment target (the game directory). Never deleted itself.
    pub target_dir: PathBuf,
    /// Top-level names the undeploy step may remove from the target.
    pub managed: ManagedNames,
}

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Overlay directory.
    pub mods: Option<PathBuf>,
    /// Output directory.
    pub output: Option<PathBuf>,
    /// Deployment target directory.
    pub target: Option<PathBuf>,
}

/// On-disk shape of `modmerge.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    mods: Option<PathBuf>,
    output: Option<PathBuf>,
    target: Option<PathBuf>,
    managed: Option<Vec<String>>,
}

impl Config {
    /// Build a configuration from explicit paths with the default managed
    /// names.
    #[must_use]
    pub fn new(mods_dir: PathBuf, output_dir: PathBuf, target_dir: PathBuf) -> Self {
        let root = mods_dir
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self {
            root,
            mods_dir,
            output_dir,
            target_dir,
            managed: ManagedNames::default(),
        }
    }

    /// Replace the managed-name set.
    #[must_use]
    pub fn with_managed(mut self, managed: ManagedNames) -> Self {
        self.managed = managed;
        self
    }

    /// Load configuration for `root`: defaults, then `modmerge.toml`, then
    /// `overrides`.
    ///
    /// Relative paths in the config file are resolved against `root`;
    /// relative command-line overrides are left as given (relative to the
    /// working directory).
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be canonicalized, the config file
    /// cannot be read or parsed, or a managed name is invalid.
    pub fn load(root: &Path, overrides: &Overrides) -> Result<Self, ConfigError> {
        let root = dunce::canonicalize(root).map_err(|source| ConfigError::Io {
            path: root.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = toml_loader::load_config(&root.join(CONFIG_FILE_NAME))?;

        let from_file = |p: Option<PathBuf>| p.map(|p| root.join(p));

        let mods_dir = overrides
            .mods
            .clone()
            .or_else(|| from_file(file.mods))
            .unwrap_or_else(|| root.join("mods"));
        let output_dir = overrides
            .output
            .clone()
            .or_else(|| from_file(file.output))
            .unwrap_or_else(|| root.join("output"));
        let target_dir = overrides
            .target
            .clone()
            .or_else(|| from_file(file.target))
            .unwrap_or_else(|| root.parent().map_or_else(|| root.clone(), Path::to_path_buf));
        let managed = match file.managed {
            Some(names) => ManagedNames::new(names)?,
            None => ManagedNames::default(),
        };

        Ok(Self {
            root,
            mods_dir,
            output_dir,
            target_dir,
            managed,
        })
    }
}
