//! Error types for slnkit-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ItemId;

/// All errors that can arise from solution model and document operations.
#[derive(Debug, Error)]
pub enum SolutionError {
    /// I/O failure, with the path that was being read or written.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The legacy JSON document could not be parsed.
    #[error("failed to parse legacy solution at {path}: {source}")]
    LegacyParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The new-schema YAML document could not be parsed.
    #[error("failed to parse solution at {path}: {source}")]
    SchemaParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// JSON serialization error (legacy write path).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error (new-schema write path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The operation exists on the model but is not implemented.
    #[error("operation not supported: {operation}")]
    Unsupported { operation: &'static str },

    /// An item id that does not belong to this solution.
    #[error("no item with id {0} in this solution")]
    UnknownItem(ItemId),

    /// The path has no file stem to derive a solution name from.
    #[error("not a solution file: {path}")]
    NotASolutionFile { path: PathBuf },
}

/// Convenience constructor for [`SolutionError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SolutionError {
    SolutionError::Io {
        path: path.into(),
        source,
    }
}

/// Errors a project type may raise while loading a project file.
#[derive(Debug, Error)]
pub enum ProjectLoadError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse project {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("project type '{project_type}' cannot load {path}")]
    Unsupported { project_type: String, path: PathBuf },
}
