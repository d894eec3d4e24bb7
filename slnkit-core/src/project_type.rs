//! The project-type collaborator contract.
//!
//! A project type turns a project file into a [`Project`]. The core never
//! knows concrete types; a registry of them is passed into the loader.

use std::path::Path;

use crate::error::ProjectLoadError;
use crate::item::Project;
use crate::types::SolutionId;

pub trait ProjectType {
    /// Human-readable type name, e.g. `"manifest"`.
    fn name(&self) -> &str;

    /// File extensions (without dot) this type can load.
    fn extensions(&self) -> &[&str];

    /// Loads the project file at the absolute `path` for `solution`.
    fn load(&self, solution: SolutionId, path: &Path) -> Result<Box<dyn Project>, ProjectLoadError>;

    fn handles(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
