//! `slnkit add <solution> <project-file>`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use slnkit_core::{AddOutcome, Project, ProjectType};
use slnkit_manifest::{Manifest, ManifestProject, ManifestProjectType, MANIFEST_EXTENSION};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Solution document.
    pub solution: PathBuf,

    /// Project file to add.
    pub project: PathBuf,

    /// Create an empty manifest at the project path first.
    #[arg(long)]
    pub new: bool,
}

impl AddArgs {
    pub fn run(self) -> Result<()> {
        let mut solution = super::open(&super::absolute(&self.solution)?)?;
        let project_path = super::absolute(&self.project)?;
        let extension = project_path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.new {
            if project_path.exists() {
                bail!("{} already exists", project_path.display());
            }
            if !ManifestProjectType.handles(&extension) {
                bail!("new projects must use the .{MANIFEST_EXTENSION} extension");
            }
            ManifestProject::create(&project_path, Manifest::default())
                .with_context(|| format!("failed to create {}", project_path.display()))?;
            println!("Created {}", project_path.display());
        }

        let registry = super::registry();
        let project_type = registry
            .find_by_extension(&extension)
            .with_context(|| format!("no project type handles {}", project_path.display()))?;
        let project = project_type
            .load(solution.id(), &project_path)
            .with_context(|| format!("failed to load project {}", project_path.display()))?;
        let name = project.name().to_owned();

        match solution.add_project(project) {
            AddOutcome::Added(_) => println!("Added {name}"),
            AddOutcome::Existing(_) => {
                bail!("{} already has a project named '{name}'", solution.name())
            }
            AddOutcome::Ignored(item) => bail!("{} cannot hold '{}'", solution.name(), item.name()),
        }
        super::save(&mut solution)?;
        Ok(())
    }
}
