//! `slnkit set-startup <solution> <project-name>`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct SetStartupArgs {
    /// Solution document.
    pub solution: PathBuf,

    /// Project to start. Required unless `--clear` is given.
    #[arg(required_unless_present = "clear")]
    pub name: Option<String>,

    /// Unset the startup project.
    #[arg(long, conflicts_with = "name")]
    pub clear: bool,
}

impl SetStartupArgs {
    pub fn run(self) -> Result<()> {
        let mut solution = super::open(&super::absolute(&self.solution)?)?;
        let id = match &self.name {
            Some(name) => Some(
                solution
                    .project_by_name(name)
                    .map(|p| p.id())
                    .with_context(|| format!("no project named '{name}' in {}", solution.name()))?,
            ),
            None => None,
        };

        solution.set_startup_project(id)?;
        match &self.name {
            Some(name) => println!("Startup project: {name}"),
            None => println!("Startup project cleared"),
        }
        super::save(&mut solution)?;
        Ok(())
    }
}
