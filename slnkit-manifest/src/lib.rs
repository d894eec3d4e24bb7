//! Manifest project type for `slnkit`.
//!
//! A `.proj` manifest is a small YAML file next to a project's sources:
//!
//! ```text
//! name: app              # optional, defaults to the file stem
//! sources: [src/main.c]  # paths relative to the manifest directory
//! references: [libA]     # sibling project names
//! ```
//!
//! [`ManifestProjectType`] is the [`ProjectType`] the loader registers for the
//! `proj` extension.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use slnkit_core::{
    paths, ItemId, Project, ProjectLoadError, ProjectSummary, ProjectType, SolutionId, SourceFile,
};

/// Extension handled by [`ManifestProjectType`].
pub const MANIFEST_EXTENSION: &str = "proj";

const TYPE_NAME: &str = "manifest";

// ---------------------------------------------------------------------------
// Manifest document
// ---------------------------------------------------------------------------

/// On-disk manifest payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// A project backed by a manifest file.
#[derive(Debug)]
pub struct ManifestProject {
    id: ItemId,
    name: String,
    location: PathBuf,
    directory: PathBuf,
    manifest: Manifest,
    solution: Option<SolutionId>,
    parent: Option<ItemId>,
    resolved: Vec<ItemId>,
    unresolved: Vec<String>,
}

impl ManifestProject {
    /// Reads the manifest at `path`. An empty file is an empty manifest.
    pub fn load(path: &Path) -> Result<Self, ProjectLoadError> {
        let location = paths::normalize(path);
        let contents = std::fs::read_to_string(&location).map_err(|e| ProjectLoadError::Io {
            path: location.clone(),
            source: e,
        })?;
        let manifest = if contents.trim().is_empty() {
            Manifest::default()
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ProjectLoadError::Parse {
                path: location.clone(),
                message: e.to_string(),
            })?
        };
        Ok(Self::from_manifest(location, manifest))
    }

    /// Writes a new manifest to `path` and returns the project it describes.
    ///
    /// Write flow: serialize → `<file>.tmp` → `rename`.
    pub fn create(path: &Path, manifest: Manifest) -> Result<Self, ProjectLoadError> {
        let location = paths::normalize(path);
        let io = |source| ProjectLoadError::Io {
            path: location.clone(),
            source,
        };
        let yaml = serde_yaml::to_string(&manifest).map_err(|e| ProjectLoadError::Parse {
            path: location.clone(),
            message: e.to_string(),
        })?;

        if let Some(parent) = location.parent() {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        let tmp = PathBuf::from(format!("{}.tmp", location.display()));
        std::fs::write(&tmp, yaml).map_err(io)?;
        if let Err(e) = std::fs::rename(&tmp, &location) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io(e));
        }
        Ok(Self::from_manifest(location, manifest))
    }

    fn from_manifest(location: PathBuf, manifest: Manifest) -> Self {
        let name = manifest.name.clone().unwrap_or_else(|| {
            location
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let directory = location
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            id: ItemId::new(),
            name,
            location,
            directory,
            manifest,
            solution: None,
            parent: None,
            resolved: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Absolute paths of every listed source.
    pub fn source_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.manifest
            .sources
            .iter()
            .map(|s| paths::normalize(&self.directory.join(paths::to_platform_path(s))))
    }

    /// Ids of sibling projects matched by `references`.
    pub fn resolved_references(&self) -> &[ItemId] {
        &self.resolved
    }

    /// Reference names with no matching sibling.
    pub fn unresolved_references(&self) -> &[String] {
        &self.unresolved
    }
}

impl Project for ManifestProject {
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
        TYPE_NAME
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

    /// Absolute paths are compared after normalisation; relative ones against
    /// the manifest's own entries.
    fn find_file(&self, path: &Path) -> Option<SourceFile> {
        let wanted = if path.is_absolute() {
            paths::normalize(path)
        } else {
            paths::normalize(&self.directory.join(path))
        };
        self.source_paths()
            .find(|candidate| *candidate == wanted)
            .map(|found| SourceFile {
                project: self.name.clone(),
                path: found,
            })
    }

    fn resolve_references(&mut self, siblings: &[ProjectSummary]) {
        self.resolved.clear();
        self.unresolved.clear();
        for reference in &self.manifest.references {
            match siblings
                .iter()
                .find(|s| s.name == *reference && s.id != self.id)
            {
                Some(sibling) => self.resolved.push(sibling.id),
                None => {
                    tracing::warn!(
                        "project {} references unknown project '{reference}'",
                        self.name
                    );
                    self.unresolved.push(reference.clone());
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Project type
// ---------------------------------------------------------------------------

/// Loads `.proj` manifests.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestProjectType;

impl ManifestProjectType {
    pub fn new() -> Self {
        Self
    }
}

impl ProjectType for ManifestProjectType {
    fn name(&self) -> &str {
        TYPE_NAME
    }

    fn extensions(&self) -> &[&str] {
        &[MANIFEST_EXTENSION]
    }

    fn load(&self, solution: SolutionId, path: &Path) -> Result<Box<dyn Project>, ProjectLoadError> {
        let mut project = ManifestProject::load(path)?;
        project.set_solution(solution);
        tracing::debug!("loaded manifest project {} from {}", project.name, path.display());
        Ok(Box::new(project))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
