//! Error types for slnkit-loader.

use std::path::PathBuf;

use thiserror::Error;

use slnkit_core::{ProjectLoadError, SolutionError};

/// All errors that can arise from loading or migrating a solution.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An error from the solution model or its document codecs.
    #[error("solution error: {0}")]
    Solution(#[from] SolutionError),

    /// A project type failed on a file it claimed.
    #[error("failed to load project {path}: {source}")]
    Project {
        path: PathBuf,
        #[source]
        source: ProjectLoadError,
    },

    /// The migrated document would land on the legacy file itself.
    #[error("refusing to migrate {path} onto itself; rename it to .asln or disable migration")]
    MigrationWouldOverwrite { path: PathBuf },

    /// Config YAML parse error, with the file path.
    #[error("failed to parse config at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML serialization error (config save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

/// Convenience constructor for [`LoadError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> LoadError {
    LoadError::Io {
        path: path.into(),
        source,
    }
}
