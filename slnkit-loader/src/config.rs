//! Loader configuration.
//!
//! Persisted at `<home>/.slnkit/config.yaml`:
//!
//! ```text
//! missing_references: skip   # skip | placeholder
//! migrate: true
//! ```
//!
//! Like the other home-rooted helpers, each function has an `_at(home, …)`
//! form used by tests and a wrapper that derives `home` from
//! `dirs::home_dir()`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, LoadError};

/// What to do with a project reference that cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingReferencePolicy {
    /// Drop the reference from the loaded tree (it stays in the document).
    #[default]
    Skip,
    /// Insert a [`PlaceholderProject`](crate::PlaceholderProject).
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub missing_references: MissingReferencePolicy,
    /// Migrate legacy documents to the new schema on load.
    pub migrate: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            missing_references: MissingReferencePolicy::Skip,
            migrate: true,
        }
    }
}

/// `<home>/.slnkit/config.yaml`. Pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".slnkit").join("config.yaml")
}

/// Loads the config, falling back to defaults when the file is absent.
pub fn load_config_at(home: &Path) -> Result<LoaderConfig, LoadError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(LoaderConfig::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    if contents.trim().is_empty() {
        return Ok(LoaderConfig::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| LoadError::Config { path, source: e })
}

/// `load_config_at` convenience wrapper.
pub fn load_config() -> Result<LoaderConfig, LoadError> {
    load_config_at(&home()?)
}

/// Atomically writes the config (`.tmp` sibling + rename).
pub fn save_config_at(home: &Path, config: &LoaderConfig) -> Result<PathBuf, LoadError> {
    let path = config_path_at(home);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    let yaml = serde_yaml::to_string(config)?;
    let tmp = path.with_file_name("config.yaml.tmp");
    std::fs::write(&tmp, yaml).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
    Ok(path)
}

fn home() -> Result<PathBuf, LoadError> {
    dirs::home_dir().ok_or(LoadError::HomeNotFound)
}
