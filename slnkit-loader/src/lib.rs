//! # slnkit-loader
//!
//! Multi-pass solution loading and legacy-format migration.
//!
//! Call [`load`] to open a solution file with explicit collaborators, or
//! build a [`SolutionLoader`] to control configuration.

pub mod config;
pub mod error;
pub mod loader;
pub mod migrate;
pub mod notify;
pub mod placeholder;
pub mod registry;

use std::path::Path;

use slnkit_core::Solution;

pub use config::{LoaderConfig, MissingReferencePolicy};
pub use error::LoadError;
pub use loader::{LoadOutcome, SolutionLoader};
pub use migrate::{FormatMigrator, Migration};
pub use notify::{ConsoleNotifier, MemoryNotifier, Notifier};
pub use placeholder::PlaceholderProject;
pub use registry::ProjectTypeRegistry;

/// Loads `path` with default configuration and returns the effective
/// solution (the migrated one for legacy files).
pub fn load(
    path: &Path,
    registry: &ProjectTypeRegistry,
    notifier: &dyn Notifier,
) -> Result<Solution, LoadError> {
    Ok(SolutionLoader::new(registry, notifier).load(path)?.into_solution())
}
