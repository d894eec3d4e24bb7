//! `slnkit find <solution> <file>`

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct FindArgs {
    /// Solution document.
    pub solution: PathBuf,

    /// Source file to look up, absolute or relative to the working directory.
    pub file: PathBuf,
}

impl FindArgs {
    pub fn run(self) -> Result<()> {
        let solution = super::open(&super::absolute(&self.solution)?)?;
        let file = super::absolute(&self.file)?;
        match solution.find_file(&file) {
            Some(found) => {
                println!("{}\t{}", found.project, found.path.display());
                Ok(())
            }
            None => bail!(
                "{} does not belong to any project in {}",
                file.display(),
                solution.name()
            ),
        }
    }
}
