//! Identifiers and small value types shared by the solution model.
//!
//! Back-references between items are expressed with these ids, never with
//! owning pointers: the [`Solution`](crate::Solution) owns its items outright.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identity of a single item (project or folder) inside a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of a solution root. Persisted as the document `Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SolutionId(pub Uuid);

impl SolutionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SolutionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SolutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for SolutionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind-class of a solution item. The derived order is the primary sort key
/// of every item collection: folders, then projects, then solution roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
    Folder,
    Project,
    Solution,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Folder => write!(f, "folder"),
            ItemKind::Project => write!(f, "project"),
            ItemKind::Solution => write!(f, "solution"),
        }
    }
}

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// A file located inside one of the solution's projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Name of the owning project.
    pub project: String,
    /// Absolute path of the file.
    pub path: PathBuf,
}

/// Read-only snapshot of a loaded project, handed to
/// [`Project::resolve_references`](crate::Project::resolve_references).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: ItemId,
    pub name: String,
    pub location: PathBuf,
}

impl ProjectSummary {
    pub fn new(id: ItemId, name: impl Into<String>, location: impl AsRef<Path>) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.as_ref().to_path_buf(),
        }
    }
}
