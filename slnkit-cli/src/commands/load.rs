//! `slnkit load <solution>`

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use slnkit_core::Project;
use slnkit_loader::{LoadOutcome, MissingReferencePolicy};

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Solution document (`.sln` or legacy `.asln`).
    pub path: PathBuf,

    /// Keep unloadable project references as placeholders.
    #[arg(long)]
    pub placeholders: bool,

    /// Load legacy documents without writing a migrated copy.
    #[arg(long)]
    pub no_migrate: bool,
}

impl LoadArgs {
    pub fn run(self) -> Result<()> {
        let path = super::absolute(&self.path)?;
        let outcome = super::open_with(&path, |config| {
            if self.placeholders {
                config.missing_references = MissingReferencePolicy::Placeholder;
            }
            if self.no_migrate {
                config.migrate = false;
            }
        })?;

        let solution = outcome.solution();
        let total = solution.projects().count();
        let unloaded = solution.projects().filter(|p| !p.is_loaded()).count();
        println!(
            "Loaded {} ({} format): {} project(s)",
            solution.name().as_str().bold(),
            solution.format(),
            total
        );
        if unloaded > 0 {
            println!("{}", format!("{unloaded} project(s) could not be loaded").as_str().yellow());
        }
        match solution.startup_project() {
            Some(project) => println!("Startup project: {}", project.name()),
            None => println!("Startup project: (none)"),
        }
        if let LoadOutcome::Migrated(migration) = &outcome {
            println!("Now using {}", migration.schema_path.display());
        }
        Ok(())
    }
}
