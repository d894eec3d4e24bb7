//! Stand-in for a project reference that could not be loaded.

use std::path::{Path, PathBuf};

use slnkit_core::{ItemId, Project, SolutionId, SourceFile};

#[derive(Debug)]
pub struct PlaceholderProject {
    id: ItemId,
    name: String,
    location: PathBuf,
    solution: Option<SolutionId>,
    parent: Option<ItemId>,
}

impl PlaceholderProject {
    /// A placeholder named after the file stem of `location`.
    pub fn new(location: impl AsRef<Path>) -> Self {
        let location = location.as_ref().to_path_buf();
        let name = location
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.display().to_string());
        Self {
            id: ItemId::new(),
            name,
            location,
            solution: None,
            parent: None,
        }
    }
}

impl Project for PlaceholderProject {
    fn id(&self) -> ItemId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> &Path {
        &self.location
    }

    fn type_name(&self) -> &str {
        "placeholder"
    }

    fn solution(&self) -> Option<SolutionId> {
        self.solution
    }

    fn set_solution(&mut self, solution: SolutionId) {
        self.solution = Some(solution);
    }

    fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    fn set_parent(&mut self, parent: Option<ItemId>) {
        self.parent = parent;
    }

    fn find_file(&self, _path: &Path) -> Option<SourceFile> {
        None
    }

    fn is_loaded(&self) -> bool {
        false
    }
}
