//! `slnkit remove <solution> <project-name>`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Solution document.
    pub solution: PathBuf,

    /// Name of the project to remove. Files on disk are left alone.
    pub name: String,
}

impl RemoveArgs {
    pub fn run(self) -> Result<()> {
        let mut solution = super::open(&super::absolute(&self.solution)?)?;
        let id = solution
            .project_by_name(&self.name)
            .map(|p| p.id())
            .with_context(|| format!("no project named '{}' in {}", self.name, solution.name()))?;

        solution.remove_item(id);
        println!("Removed {}", self.name);
        super::save(&mut solution)?;
        Ok(())
    }
}
