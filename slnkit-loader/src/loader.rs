//! Multi-pass solution loading.
//!
//! ## `SolutionLoader::load` passes
//!
//! 1. Sniff the document format (no parsing, no side effects).
//! 2. Parse the document into a solution shell (references, no projects).
//! 3. Resolve each project reference through the project-type registry.
//! 4. Let every loaded project resolve its references to siblings.
//! 5. Resolve the persisted startup name to exactly one project.
//! 6. Legacy documents only: migrate to the new schema.
//!
//! New-schema documents stop after pass 5 and never reach the legacy parser
//! or the migrator.

use std::path::{Path, PathBuf};

use slnkit_core::{
    document, paths, ItemId, Project, ProjectSummary, Solution, SolutionFormat, SolutionItem,
};

use crate::config::{LoaderConfig, MissingReferencePolicy};
use crate::error::LoadError;
use crate::migrate::{FormatMigrator, Migration};
use crate::notify::Notifier;
use crate::placeholder::PlaceholderProject;
use crate::registry::ProjectTypeRegistry;

/// What [`SolutionLoader::load`] produced.
#[derive(Debug)]
pub enum LoadOutcome {
    /// Loaded as-is: a new-schema document, or legacy with migration disabled.
    Loaded(Solution),
    /// A legacy document was migrated; the new-schema solution is effective.
    Migrated(Migration),
}

impl LoadOutcome {
    /// The solution to use for the rest of the session.
    pub fn into_solution(self) -> Solution {
        match self {
            LoadOutcome::Loaded(solution) => solution,
            LoadOutcome::Migrated(migration) => migration.solution,
        }
    }

    pub fn solution(&self) -> &Solution {
        match self {
            LoadOutcome::Loaded(solution) => solution,
            LoadOutcome::Migrated(migration) => &migration.solution,
        }
    }

    pub fn is_migrated(&self) -> bool {
        matches!(self, LoadOutcome::Migrated(_))
    }
}

pub struct SolutionLoader<'a> {
    registry: &'a ProjectTypeRegistry,
    notifier: &'a dyn Notifier,
    config: LoaderConfig,
}

impl<'a> SolutionLoader<'a> {
    pub fn new(registry: &'a ProjectTypeRegistry, notifier: &'a dyn Notifier) -> Self {
        Self {
            registry,
            notifier,
            config: LoaderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Loads the solution document at `path`.
    ///
    /// Errors after the format sniff propagate unchanged; there is no partial
    /// result.
    pub fn load(&self, path: &Path) -> Result<LoadOutcome, LoadError> {
        match document::sniff(path)? {
            SolutionFormat::Schema => {
                tracing::debug!("loading new-schema solution {}", path.display());
                let mut solution = document::read_schema(path)?;
                self.resolve(&mut solution)?;
                Ok(LoadOutcome::Loaded(solution))
            }
            SolutionFormat::Legacy => {
                tracing::debug!("loading legacy solution {}", path.display());
                let mut solution = document::read_legacy(path)?;
                self.resolve(&mut solution)?;
                if !self.config.migrate {
                    return Ok(LoadOutcome::Loaded(solution));
                }
                let migration = FormatMigrator::new(self.notifier).migrate(solution)?;
                Ok(LoadOutcome::Migrated(migration))
            }
        }
    }

    /// Runs passes 3 to 5 on a freshly parsed shell.
    pub fn resolve(&self, solution: &mut Solution) -> Result<(), LoadError> {
        self.load_references(solution)?;
        resolve_project_references(solution);
        resolve_startup(solution)?;
        Ok(())
    }

    /// Pass 3. Returns the number of projects attached (placeholders included).
    fn load_references(&self, solution: &mut Solution) -> Result<usize, LoadError> {
        let references = solution.project_references().to_vec();
        let mut attached = 0;

        for reference in &references {
            let path = reference_path(solution, reference);
            let project: Box<dyn Project> = match self.load_project(solution, reference, &path)? {
                Some(project) => project,
                None if self.config.missing_references == MissingReferencePolicy::Placeholder => {
                    Box::new(PlaceholderProject::new(&path))
                }
                None => continue,
            };
            solution.attach_loaded(SolutionItem::Project(project));
            attached += 1;
        }
        Ok(attached)
    }

    fn load_project(
        &self,
        solution: &Solution,
        reference: &str,
        path: &Path,
    ) -> Result<Option<Box<dyn Project>>, LoadError> {
        let project_type = paths::extension_of(reference)
            .and_then(|ext| self.registry.find_by_extension(&ext));

        match project_type {
            Some(project_type) if path.exists() => {
                let mut project = project_type
                    .load(solution.id(), path)
                    .map_err(|e| LoadError::Project {
                        path: path.to_path_buf(),
                        source: e,
                    })?;
                project.set_solution(solution.id());
                Ok(Some(project))
            }
            Some(_) => {
                tracing::warn!("failed to load {}: file not found", path.display());
                Ok(None)
            }
            None => {
                tracing::warn!("failed to load {}: no project type for it", path.display());
                Ok(None)
            }
        }
    }
}

/// Absolute platform path of a document-form reference.
fn reference_path(solution: &Solution, reference: &str) -> PathBuf {
    paths::normalize(
        &solution
            .current_directory()
            .join(paths::to_platform_path(reference)),
    )
}

/// Pass 4: every project sees the full set of loaded siblings.
fn resolve_project_references(solution: &mut Solution) {
    let siblings: Vec<ProjectSummary> = solution.projects().map(|p| p.summary()).collect();
    for project in solution.projects_mut() {
        project.resolve_references(&siblings);
    }
}

/// Pass 5: exactly one name match sets the startup project; zero or several
/// leave it unset.
fn resolve_startup(solution: &mut Solution) -> Result<(), LoadError> {
    let Some(name) = solution.startup_item_name().map(str::to_owned) else {
        return Ok(());
    };
    let matches: Vec<ItemId> = solution
        .projects()
        .filter(|p| p.name() == name)
        .map(|p| p.id())
        .collect();

    match matches.as_slice() {
        [only] => solution.set_startup_project(Some(*only))?,
        [] => tracing::debug!("startup item '{name}' matches no project"),
        _ => tracing::debug!("startup item '{name}' matches {} projects", matches.len()),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fs;
    use std::path::Path;
    use std::rc::Rc;

    use slnkit_core::{ProjectLoadError, ProjectType, SolutionId, SourceFile};
    use tempfile::TempDir;

    use super::*;
    use crate::notify::MemoryNotifier;

    #[derive(Debug)]
    struct TestProject {
        id: ItemId,
        name: String,
        location: PathBuf,
        solution: Option<SolutionId>,
        parent: Option<ItemId>,
        resolved_with: Rc<Cell<usize>>,
    }

    impl Project for TestProject {
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
            "test"
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
        fn find_file(&self, _: &Path) -> Option<SourceFile> {
            None
        }
        fn resolve_references(&mut self, siblings: &[ProjectSummary]) {
            self.resolved_with.set(siblings.len());
        }
    }

    /// Names projects after the first line of the file, or the stem.
    struct TestType {
        resolved_with: Rc<Cell<usize>>,
    }

    impl ProjectType for TestType {
        fn name(&self) -> &str {
            "test"
        }
        fn extensions(&self) -> &[&str] {
            &["proj"]
        }
        fn load(&self, _: SolutionId, path: &Path) -> Result<Box<dyn Project>, ProjectLoadError> {
            let contents = fs::read_to_string(path).map_err(|e| ProjectLoadError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            if contents.starts_with("!fail") {
                return Err(ProjectLoadError::Parse {
                    path: path.to_path_buf(),
                    message: "fixture failure".into(),
                });
            }
            let name = contents
                .lines()
                .next()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_owned)
                .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
                .unwrap_or_default();
            Ok(Box::new(TestProject {
                id: ItemId::new(),
                name,
                location: path.to_path_buf(),
                solution: None,
                parent: None,
                resolved_with: self.resolved_with.clone(),
            }))
        }
    }

    fn fixture(dir: &TempDir, rel: &str, content: &str) {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    fn legacy(dir: &TempDir, startup: &str, projects: &[&str]) -> PathBuf {
        let doc = format!(
            r#"{{"StartupItem": "{startup}", "Projects": [{}]}}"#,
            projects
                .iter()
                .map(|p| format!("\"{p}\""))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let path = dir.path().join("demo.asln");
        fs::write(&path, doc).expect("write legacy");
        path
    }

    fn registry(counter: &Rc<Cell<usize>>) -> ProjectTypeRegistry {
        ProjectTypeRegistry::new().with(TestType {
            resolved_with: counter.clone(),
        })
    }

    #[test]
    fn every_project_sees_all_siblings() {
        let dir = TempDir::new().expect("tempdir");
        fixture(&dir, "a/a.proj", "");
        fixture(&dir, "b/b.proj", "");
        fixture(&dir, "c/c.proj", "");
        let path = legacy(&dir, "a", &["a/a.proj", "b/b.proj", "c/c.proj"]);

        let counter = Rc::new(Cell::new(0));
        let registry = registry(&counter);
        let notifier = MemoryNotifier::new();
        let loader = SolutionLoader::new(&registry, &notifier).with_config(LoaderConfig {
            migrate: false,
            ..LoaderConfig::default()
        });
        let outcome = loader.load(&path).expect("load");

        assert!(!outcome.is_migrated());
        assert_eq!(outcome.solution().items().len(), 3);
        assert_eq!(counter.get(), 3);
        assert!(notifier.lines().is_empty());
    }

    #[test]
    fn ambiguous_startup_is_left_unset() {
        let dir = TempDir::new().expect("tempdir");
        fixture(&dir, "one/one.proj", "twin\n");
        fixture(&dir, "two/two.proj", "twin\n");
        let path = legacy(&dir, "twin", &["one/one.proj", "two/two.proj"]);

        let counter = Rc::new(Cell::new(0));
        let registry = registry(&counter);
        let notifier = MemoryNotifier::new();
        let mut solution = document::read_legacy(&path).expect("read");
        SolutionLoader::new(&registry, &notifier)
            .resolve(&mut solution)
            .expect("resolve");

        assert_eq!(solution.projects().count(), 2);
        assert!(solution.startup_project().is_none());
    }

    #[test]
    fn unknown_extension_is_skipped() {
        let dir = TempDir::new().expect("tempdir");
        fixture(&dir, "x/x.vcxproj", "");
        let path = legacy(&dir, "", &["x/x.vcxproj"]);

        let counter = Rc::new(Cell::new(0));
        let registry = registry(&counter);
        let notifier = MemoryNotifier::new();
        let mut solution = document::read_legacy(&path).expect("read");
        SolutionLoader::new(&registry, &notifier)
            .resolve(&mut solution)
            .expect("resolve");

        assert!(solution.items().is_empty());
        assert_eq!(solution.project_references(), ["x/x.vcxproj"]);
    }

    #[test]
    fn placeholder_policy_fills_gaps() {
        let dir = TempDir::new().expect("tempdir");
        let path = legacy(&dir, "missing", &["missing/missing.proj"]);

        let counter = Rc::new(Cell::new(0));
        let registry = registry(&counter);
        let notifier = MemoryNotifier::new();
        let mut solution = document::read_legacy(&path).expect("read");
        SolutionLoader::new(&registry, &notifier)
            .with_config(LoaderConfig {
                missing_references: MissingReferencePolicy::Placeholder,
                migrate: true,
            })
            .resolve(&mut solution)
            .expect("resolve");

        let only = solution.projects().next().expect("placeholder");
        assert_eq!(only.name(), "missing");
        assert!(!only.is_loaded());
        assert_eq!(solution.startup_project().map(|p| p.name()), Some("missing"));
    }

    #[test]
    fn project_type_failure_propagates() {
        let dir = TempDir::new().expect("tempdir");
        fixture(&dir, "bad/bad.proj", "!fail");
        let path = legacy(&dir, "", &["bad/bad.proj"]);

        let counter = Rc::new(Cell::new(0));
        let registry = registry(&counter);
        let notifier = MemoryNotifier::new();
        let err = SolutionLoader::new(&registry, &notifier)
            .load(&path)
            .unwrap_err();
        assert!(matches!(err, LoadError::Project { .. }), "got: {err}");
        assert!(!dir.path().join("demo.sln").exists());
    }
}
