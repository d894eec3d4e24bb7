//! Registry of the project types available to the loader.
//!
//! Passed explicitly into [`SolutionLoader`](crate::SolutionLoader); there is
//! no global lookup.

use std::fmt;

use slnkit_core::ProjectType;

#[derive(Default)]
pub struct ProjectTypeRegistry {
    types: Vec<Box<dyn ProjectType>>,
}

impl ProjectTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ProjectTypeRegistry::register`].
    pub fn with(mut self, project_type: impl ProjectType + 'static) -> Self {
        self.register(project_type);
        self
    }

    pub fn register(&mut self, project_type: impl ProjectType + 'static) -> &mut Self {
        self.types.push(Box::new(project_type));
        self
    }

    /// First registered type handling `extension` (case-insensitive, no dot).
    pub fn find_by_extension(&self, extension: &str) -> Option<&dyn ProjectType> {
        self.types
            .iter()
            .find(|t| t.handles(extension))
            .map(|t| &**t)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ProjectType> + '_ {
        self.types.iter().map(|t| &**t)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl fmt::Debug for ProjectTypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.types.iter().map(|t| t.name()))
            .finish()
    }
}
