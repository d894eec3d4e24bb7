//! Solution items: the [`Project`] capability trait, solution folders, and
//! the closed [`SolutionItem`] variant stored in every collection.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use crate::collection::{visit, SortedItemCollection};
use crate::types::{ItemId, ItemKind, ProjectSummary, SolutionId, SourceFile};

// ---------------------------------------------------------------------------
// Project capability
// ---------------------------------------------------------------------------

/// A project entry as seen by the solution.
///
/// Concrete project types live outside the core and are constructed by a
/// project-type loader. `solution` and `parent` are non-owning
/// back-references.
pub trait Project: fmt::Debug {
    fn id(&self) -> ItemId;

    fn name(&self) -> &str;

    /// Absolute path of the project file.
    fn location(&self) -> &Path;

    /// Name of the project type that produced this project.
    fn type_name(&self) -> &str;

    fn solution(&self) -> Option<SolutionId>;

    fn set_solution(&mut self, solution: SolutionId);

    /// Owning folder; `None` means the project sits directly under the root.
    fn parent(&self) -> Option<ItemId>;

    fn set_parent(&mut self, parent: Option<ItemId>);

    /// Looks up `path` among the project's files.
    fn find_file(&self, path: &Path) -> Option<SourceFile>;

    /// Post-load hook: wire references to sibling projects once the full set
    /// is known. The default does nothing.
    fn resolve_references(&mut self, _siblings: &[ProjectSummary]) {}

    /// `false` for stand-ins of references that could not be loaded.
    fn is_loaded(&self) -> bool {
        true
    }

    fn summary(&self) -> ProjectSummary {
        ProjectSummary::new(self.id(), self.name(), self.location())
    }
}

// ---------------------------------------------------------------------------
// Folder
// ---------------------------------------------------------------------------

/// A named grouping node owning its own sorted children.
#[derive(Debug)]
pub struct SolutionFolder {
    id: ItemId,
    name: String,
    parent: Option<ItemId>,
    items: SortedItemCollection,
}

impl SolutionFolder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            parent: None,
            items: SortedItemCollection::new(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<ItemId>) {
        self.parent = parent;
    }

    pub fn items(&self) -> &SortedItemCollection {
        &self.items
    }

    /// Inserts `item` in sorted order and points its parent at this folder.
    pub fn add_item(&mut self, mut item: SolutionItem) -> ItemId {
        item.set_parent(Some(self.id));
        let id = item.id();
        self.items.insert(item);
        id
    }

    pub fn remove_item(&mut self, id: ItemId) -> Option<SolutionItem> {
        let mut removed = self.items.remove(id)?;
        removed.set_parent(None);
        Some(removed)
    }

    /// Depth-first, children of a nested folder before the folder itself.
    pub fn visit_children<F: FnMut(&SolutionItem)>(&self, mut visitor: F) {
        visit(&self.items, &mut visitor);
    }

    pub fn find_file(&self, path: &Path) -> Option<SourceFile> {
        self.items.projects().find_map(|p| p.find_file(path))
    }
}

// ---------------------------------------------------------------------------
// Closed item variant
// ---------------------------------------------------------------------------

/// Every entry of a [`SortedItemCollection`].
pub enum SolutionItem {
    Folder(SolutionFolder),
    Project(Box<dyn Project>),
}

impl fmt::Debug for SolutionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionItem::Folder(folder) => f.debug_tuple("Folder").field(folder).finish(),
            SolutionItem::Project(project) => f.debug_tuple("Project").field(project).finish(),
        }
    }
}

impl SolutionItem {
    pub fn id(&self) -> ItemId {
        match self {
            SolutionItem::Folder(folder) => folder.id(),
            SolutionItem::Project(project) => project.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SolutionItem::Folder(folder) => folder.name(),
            SolutionItem::Project(project) => project.name(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            SolutionItem::Folder(_) => ItemKind::Folder,
            SolutionItem::Project(_) => ItemKind::Project,
        }
    }

    pub fn parent(&self) -> Option<ItemId> {
        match self {
            SolutionItem::Folder(folder) => folder.parent(),
            SolutionItem::Project(project) => project.parent(),
        }
    }

    pub fn set_parent(&mut self, parent: Option<ItemId>) {
        match self {
            SolutionItem::Folder(folder) => folder.set_parent(parent),
            SolutionItem::Project(project) => project.set_parent(parent),
        }
    }

    /// Folders can be renamed in place; projects take their name from the
    /// project file.
    pub fn can_rename(&self) -> bool {
        matches!(self, SolutionItem::Folder(_))
    }

    pub fn as_project(&self) -> Option<&dyn Project> {
        match self {
            SolutionItem::Project(project) => Some(&**project),
            SolutionItem::Folder(_) => None,
        }
    }

    pub fn as_project_mut(&mut self) -> Option<&mut dyn Project> {
        match self {
            SolutionItem::Project(project) => Some(&mut **project),
            SolutionItem::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&SolutionFolder> {
        match self {
            SolutionItem::Folder(folder) => Some(folder),
            SolutionItem::Project(_) => None,
        }
    }

    pub fn is_project(&self) -> bool {
        matches!(self, SolutionItem::Project(_))
    }

    pub fn find_file(&self, path: &Path) -> Option<SourceFile> {
        match self {
            SolutionItem::Folder(folder) => folder.find_file(path),
            SolutionItem::Project(project) => project.find_file(path),
        }
    }

    /// Total order: kind-class first, then name.
    pub fn compare(&self, other: &SolutionItem) -> Ordering {
        compare_keys((self.kind(), self.name()), (other.kind(), other.name()))
    }
}

impl From<SolutionFolder> for SolutionItem {
    fn from(folder: SolutionFolder) -> Self {
        SolutionItem::Folder(folder)
    }
}

impl From<Box<dyn Project>> for SolutionItem {
    fn from(project: Box<dyn Project>) -> Self {
        SolutionItem::Project(project)
    }
}

/// Ordering over `(kind, name)` keys, shared by items and solution roots.
pub fn compare_keys(a: (ItemKind, &str), b: (ItemKind, &str)) -> Ordering {
    a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1))
}
