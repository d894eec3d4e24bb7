//! The [`Solution`] root aggregate.
//!
//! A solution owns an ordered tree of items and the persisted metadata that
//! describes it: the list of project references (document-form paths
//! relative to the solution directory) and the startup item name.
//!
//! Invariants kept by [`Solution::add_item`] / [`Solution::remove_item`]:
//! - `project_references` holds exactly the relative paths of the root-level
//!   project items (plus any references the loader could not resolve);
//! - no two root-level projects share a name;
//! - at most one project is the startup project.

use std::path::{Path, PathBuf};

use crate::collection::{visit, SortedItemCollection};
use crate::document::{self, SolutionFormat};
use crate::error::SolutionError;
use crate::item::{compare_keys, Project, SolutionItem};
use crate::paths;
use crate::types::{ItemId, ItemKind, SolutionId, SourceFile};

/// Result of [`Solution::add_item`].
#[derive(Debug)]
pub enum AddOutcome {
    /// The project was inserted.
    Added(ItemId),
    /// A project with the same name already exists; nothing changed.
    Existing(ItemId),
    /// Not a project; handed back untouched.
    Ignored(SolutionItem),
}

impl AddOutcome {
    /// Id of the project now in the solution, if any.
    pub fn id(&self) -> Option<ItemId> {
        match self {
            AddOutcome::Added(id) | AddOutcome::Existing(id) => Some(*id),
            AddOutcome::Ignored(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct Solution {
    id: SolutionId,
    location: PathBuf,
    current_directory: PathBuf,
    format: SolutionFormat,
    items: SortedItemCollection,
    project_references: Vec<String>,
    startup_item_name: Option<String>,
    startup_project: Option<ItemId>,
    migrated_from: Option<String>,
}

impl Solution {
    /// A fresh, empty solution at `<directory>/<name>.<format extension>`.
    pub fn create(directory: impl AsRef<Path>, name: &str, format: SolutionFormat) -> Self {
        let directory = paths::normalize(directory.as_ref());
        let location = directory.join(format!("{name}.{}", format.extension()));
        Self::shell(SolutionId::new(), location, format)
    }

    /// An empty solution bound to an existing document path.
    pub(crate) fn shell(id: SolutionId, location: PathBuf, format: SolutionFormat) -> Self {
        let location = paths::normalize(&location);
        let current_directory = location
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            id,
            location,
            current_directory,
            format,
            items: SortedItemCollection::new(),
            project_references: Vec::new(),
            startup_item_name: None,
            startup_project: None,
            migrated_from: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn id(&self) -> SolutionId {
        self.id
    }

    /// File stem of the document location.
    pub fn name(&self) -> String {
        self.location
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The root always takes its name from its file.
    pub fn can_rename(&self) -> bool {
        false
    }

    pub fn kind(&self) -> ItemKind {
        ItemKind::Solution
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn current_directory(&self) -> &Path {
        &self.current_directory
    }

    pub fn format(&self) -> SolutionFormat {
        self.format
    }

    pub fn items(&self) -> &SortedItemCollection {
        &self.items
    }

    pub fn projects(&self) -> impl Iterator<Item = &dyn Project> + '_ {
        self.items.projects()
    }

    pub fn projects_mut(&mut self) -> impl Iterator<Item = &mut dyn Project> + '_ {
        self.items.projects_mut()
    }

    pub fn project(&self, id: ItemId) -> Option<&dyn Project> {
        self.items.get(id).and_then(SolutionItem::as_project)
    }

    pub fn project_by_name(&self, name: &str) -> Option<&dyn Project> {
        self.projects().find(|p| p.name() == name)
    }

    pub fn project_references(&self) -> &[String] {
        &self.project_references
    }

    pub fn startup_item_name(&self) -> Option<&str> {
        self.startup_item_name.as_deref()
    }

    pub fn startup_project(&self) -> Option<&dyn Project> {
        self.startup_project.and_then(|id| self.project(id))
    }

    pub fn startup_project_id(&self) -> Option<ItemId> {
        self.startup_project
    }

    /// Name of the legacy file this solution was migrated from, if any.
    pub fn migrated_from(&self) -> Option<&str> {
        self.migrated_from.as_deref()
    }

    pub fn set_migrated_from(&mut self, legacy_file: impl Into<String>) {
        self.migrated_from = Some(legacy_file.into());
    }

    /// Path the document is written to by [`Solution::save`].
    pub fn document_path(&self) -> PathBuf {
        self.current_directory
            .join(format!("{}.{}", self.name(), self.format.extension()))
    }

    /// Document-form path of `location` relative to the solution directory.
    pub fn relative_reference(&self, location: &Path) -> String {
        paths::to_document_path(paths::make_relative(&self.current_directory, location))
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Adds a project to the root of the solution.
    ///
    /// A project whose name is already taken leaves the solution untouched
    /// and yields the existing project's id. Non-project items are handed
    /// back without being inserted.
    pub fn add_item(&mut self, item: SolutionItem) -> AddOutcome {
        let mut project = match item {
            SolutionItem::Project(project) => project,
            other => return AddOutcome::Ignored(other),
        };

        if let Some(existing) = self.project_by_name(project.name()) {
            return AddOutcome::Existing(existing.id());
        }

        let reference = self.relative_reference(project.location());
        project.set_solution(self.id);
        project.set_parent(None);
        let id = project.id();
        tracing::debug!("adding project {} as {reference}", project.name());
        self.project_references.push(reference);
        self.items.insert(SolutionItem::Project(project));
        AddOutcome::Added(id)
    }

    /// Shorthand for [`Solution::add_item`] with a project.
    pub fn add_project(&mut self, project: Box<dyn Project>) -> AddOutcome {
        self.add_item(SolutionItem::Project(project))
    }

    /// Removes a root-level project together with its reference entry.
    ///
    /// Returns `None` (and changes nothing) for unknown ids and non-project
    /// items.
    pub fn remove_item(&mut self, id: ItemId) -> Option<SolutionItem> {
        let location = self.project(id)?.location().to_path_buf();
        let removed = self.items.remove(id)?;

        let reference = self.relative_reference(&location);
        if let Some(index) = self
            .project_references
            .iter()
            .position(|r| paths::canonical_reference(r) == reference)
        {
            self.project_references.remove(index);
        }
        if self.startup_project == Some(id) {
            self.startup_project = None;
        }
        Some(removed)
    }

    /// Inserts an item reconstructed from this solution's own document
    /// without touching `project_references`.
    pub fn attach_loaded(&mut self, mut item: SolutionItem) -> ItemId {
        if let Some(project) = item.as_project_mut() {
            project.set_solution(self.id);
        }
        let id = item.id();
        self.items.insert(item);
        id
    }

    /// Points the startup pointer at a root-level project, or clears it.
    pub fn set_startup_project(&mut self, id: Option<ItemId>) -> Result<(), SolutionError> {
        if let Some(id) = id {
            if self.project(id).is_none() {
                return Err(SolutionError::UnknownItem(id));
            }
        }
        self.startup_project = id;
        Ok(())
    }

    pub(crate) fn set_startup_item_name(&mut self, name: Option<String>) {
        self.startup_item_name = name;
    }

    /// Stores document references in canonical form.
    pub(crate) fn set_project_references(&mut self, references: Vec<String>) {
        self.project_references = references
            .iter()
            .map(|r| paths::canonical_reference(r))
            .collect();
    }

    /// Consumes the solution, yielding its root items in sorted order.
    pub fn into_items(mut self) -> Vec<SolutionItem> {
        self.items.drain().collect()
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Depth-first over the tree in sorted order; children of a folder are
    /// visited before the folder itself.
    pub fn visit_children<F: FnMut(&SolutionItem)>(&self, mut visitor: F) {
        visit(&self.items, &mut visitor);
    }

    /// First match over the root-level projects.
    pub fn find_file(&self, path: &Path) -> Option<SourceFile> {
        self.projects().find_map(|p| p.find_file(path))
    }

    pub fn find_project(&self, _name: &str) -> Result<&dyn Project, SolutionError> {
        Err(SolutionError::Unsupported {
            operation: "find_project",
        })
    }

    pub fn update_item(&mut self, _item: &SolutionItem) -> Result<(), SolutionError> {
        Err(SolutionError::Unsupported {
            operation: "update_item",
        })
    }

    /// Orders this root against an item: solutions sort after every folder
    /// and project.
    pub fn compare_to(&self, other: &SolutionItem) -> std::cmp::Ordering {
        let name = self.name();
        compare_keys((self.kind(), name.as_str()), (other.kind(), other.name()))
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Writes the solution through its format's codec and returns the path.
    ///
    /// The startup item name is refreshed from the startup project and every
    /// reference is normalised to document form first.
    pub fn save(&mut self) -> Result<PathBuf, SolutionError> {
        self.startup_item_name = self.startup_project().map(|p| p.name().to_owned());
        for reference in &mut self.project_references {
            *reference = paths::canonical_reference(reference);
        }

        let path = self.document_path();
        match self.format {
            SolutionFormat::Legacy => document::write_legacy(&path, self)?,
            SolutionFormat::Schema => document::write_schema(&path, self)?,
        }
        tracing::info!("saved solution: {}", path.display());
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::item::testing::StubProject;
    use crate::item::SolutionFolder;

    fn solution() -> Solution {
        Solution::create("/work/demo", "demo", SolutionFormat::Schema)
    }

    fn stub(name: &str) -> Box<dyn Project> {
        StubProject::boxed(name, format!("/work/demo/{name}/{name}.proj"))
    }

    fn reference_set(s: &Solution) -> BTreeSet<String> {
        s.project_references().iter().cloned().collect()
    }

    fn item_set(s: &Solution) -> BTreeSet<String> {
        s.projects().map(|p| s.relative_reference(p.location())).collect()
    }

    #[test]
    fn create_derives_name_and_directory() {
        let s = solution();
        assert_eq!(s.name(), "demo");
        assert_eq!(s.current_directory(), Path::new("/work/demo"));
        assert_eq!(s.location(), Path::new("/work/demo/demo.sln"));
        assert!(s.items().is_empty());
        assert!(s.project_references().is_empty());
    }

    #[test]
    fn add_records_relative_reference_and_binds_solution() {
        let mut s = solution();
        let id = s.add_project(stub("libA")).id().expect("added");
        assert_eq!(s.project_references(), ["libA/libA.proj"]);
        assert_eq!(s.project(id).and_then(|p| p.solution()), Some(s.id()));
    }

    #[test]
    fn duplicate_name_add_is_idempotent() {
        let mut s = solution();
        let first = s.add_project(stub("app"));
        let second = s.add_project(StubProject::boxed("app", "/elsewhere/app.proj"));

        assert!(matches!(first, AddOutcome::Added(_)));
        assert!(matches!(second, AddOutcome::Existing(_)));
        assert_eq!(first.id(), second.id());
        assert_eq!(s.project_references(), ["app/app.proj"]);
        assert_eq!(s.items().len(), 1);
    }

    #[test]
    fn non_project_add_is_ignored() {
        let mut s = solution();
        let outcome = s.add_item(SolutionFolder::new("docs").into());
        match outcome {
            AddOutcome::Ignored(item) => assert_eq!(item.name(), "docs"),
            other => panic!("expected Ignored, got {other:?}"),
        }
        assert!(s.items().is_empty());
        assert!(s.project_references().is_empty());
    }

    #[test]
    fn references_track_items_through_add_and_remove() {
        let mut s = solution();
        let mut ids = Vec::new();
        for name in ["web", "core", "api", "cli"] {
            ids.push(s.add_project(stub(name)).id().expect("added"));
            assert_eq!(reference_set(&s), item_set(&s));
        }
        s.add_project(stub("core"));
        assert_eq!(reference_set(&s), item_set(&s));

        for id in [ids[1], ids[3]] {
            assert!(s.remove_item(id).is_some());
            assert_eq!(reference_set(&s), item_set(&s));
        }
        assert_eq!(s.project_references().len(), 2);
    }

    #[test]
    fn items_iterate_sorted_by_name() {
        let mut s = solution();
        for name in ["web", "core", "api"] {
            s.add_project(stub(name));
        }
        let names: Vec<_> = s.items().iter().map(|i| i.name().to_owned()).collect();
        assert_eq!(names, vec!["api", "core", "web"]);
    }

    #[test]
    fn remove_unknown_or_folder_is_noop() {
        let mut s = solution();
        s.add_project(stub("app"));
        let folder_id = s.attach_loaded(SolutionFolder::new("docs").into());

        assert!(s.remove_item(ItemId::new()).is_none());
        assert!(s.remove_item(folder_id).is_none());
        assert_eq!(s.items().len(), 2);
        assert_eq!(s.project_references().len(), 1);
    }

    #[test]
    fn removing_startup_project_clears_pointer() {
        let mut s = solution();
        let id = s.add_project(stub("app")).id().expect("added");
        s.set_startup_project(Some(id)).expect("startup");
        s.remove_item(id);
        assert!(s.startup_project().is_none());
    }

    #[test]
    fn startup_must_be_a_member_project() {
        let mut s = solution();
        let err = s.set_startup_project(Some(ItemId::new())).unwrap_err();
        assert!(matches!(err, SolutionError::UnknownItem(_)));
    }

    #[test]
    fn visit_children_goes_into_folders_first() {
        let mut s = solution();
        let mut folder = SolutionFolder::new("libs");
        folder.add_item(stub("inner").into());
        s.attach_loaded(folder.into());
        s.add_project(stub("app"));

        let mut seen = Vec::new();
        s.visit_children(|item| seen.push(item.name().to_owned()));
        assert_eq!(seen, vec!["inner", "libs", "app"]);
    }

    #[test]
    fn find_file_returns_first_project_match() {
        let mut s = solution();
        let file = PathBuf::from("/work/demo/app/main.c");
        s.add_project(Box::new(
            StubProject::new("app", "/work/demo/app/app.proj").with_file(&file),
        ));
        s.add_project(stub("lib"));

        let hit = s.find_file(&file).expect("found");
        assert_eq!(hit.project, "app");
        assert!(s.find_file(Path::new("/nope.c")).is_none());
    }

    #[test]
    fn unsupported_operations_signal_unsupported() {
        let mut s = solution();
        assert!(matches!(
            s.find_project("app"),
            Err(SolutionError::Unsupported { operation: "find_project" })
        ));
        let folder: SolutionItem = SolutionFolder::new("x").into();
        assert!(matches!(
            s.update_item(&folder),
            Err(SolutionError::Unsupported { operation: "update_item" })
        ));
    }

    #[test]
    fn root_sorts_after_items_and_cannot_rename() {
        let s = solution();
        let project: SolutionItem = stub("zzz").into();
        assert_eq!(s.compare_to(&project), std::cmp::Ordering::Greater);
        assert!(!s.can_rename());
    }
}
