//! Subcommand implementations and the helpers they share.

pub mod add;
pub mod config;
pub mod find;
pub mod info;
pub mod load;
pub mod remove;
pub mod startup;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use slnkit_core::Solution;
use slnkit_loader::{
    config as loader_config, ConsoleNotifier, LoadOutcome, LoaderConfig, ProjectTypeRegistry,
    SolutionLoader,
};
use slnkit_manifest::ManifestProjectType;

/// Every project type this binary knows about.
pub fn registry() -> ProjectTypeRegistry {
    ProjectTypeRegistry::new().with(ManifestProjectType::new())
}

/// `~/.slnkit/config.yaml`, or defaults when it does not exist.
pub fn config() -> Result<LoaderConfig> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    loader_config::load_config_at(&home).context("failed to read slnkit config")
}

/// Makes `path` absolute against the working directory.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("could not determine working directory")?;
    Ok(cwd.join(path))
}

/// Loads `path` with the user's configuration adjusted by `adjust`.
pub fn open_with(
    path: &Path,
    adjust: impl FnOnce(&mut LoaderConfig),
) -> Result<LoadOutcome> {
    let mut config = config()?;
    adjust(&mut config);
    let registry = registry();
    let notifier = ConsoleNotifier;
    SolutionLoader::new(&registry, &notifier)
        .with_config(config)
        .load(path)
        .with_context(|| format!("failed to load solution {}", path.display()))
}

/// Loads `path` with the user's configuration and returns the effective
/// solution.
pub fn open(path: &Path) -> Result<Solution> {
    Ok(open_with(path, |_| {})?.into_solution())
}

/// Persists `solution` and reports where it went.
pub fn save(solution: &mut Solution) -> Result<PathBuf> {
    let path = solution
        .save()
        .with_context(|| format!("failed to save solution {}", solution.name()))?;
    println!("Saved {}", path.display());
    Ok(path)
}
