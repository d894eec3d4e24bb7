//! On-disk solution documents.
//!
//! # Formats
//!
//! ```text
//! <dir>/<name>.asln   legacy, JSON   { "Id", "StartupItem", "Projects": [..] }
//! <dir>/<name>.sln    new schema, YAML headed by `# slnkit solution v2`
//! ```
//!
//! [`sniff`] tells the two apart without parsing: it peeks at the first
//! non-blank line for the schema marker. Both writers use the same atomic
//! flow: serialize → `<file>.tmp` sibling → `rename`.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{io_err, SolutionError};
use crate::item::{SolutionFolder, SolutionItem};
use crate::paths;
use crate::solution::Solution;
use crate::types::SolutionId;

/// Extension of legacy solution files.
pub const LEGACY_EXTENSION: &str = "asln";

/// Extension of new-schema solution files.
pub const SCHEMA_EXTENSION: &str = "sln";

/// First line of every new-schema document.
pub const SCHEMA_MARKER: &str = "# slnkit solution v2";

const SNIFF_LIMIT: u64 = 512;

/// Persistence format of a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionFormat {
    Legacy,
    Schema,
}

impl SolutionFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SolutionFormat::Legacy => LEGACY_EXTENSION,
            SolutionFormat::Schema => SCHEMA_EXTENSION,
        }
    }
}

impl std::fmt::Display for SolutionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolutionFormat::Legacy => write!(f, "legacy"),
            SolutionFormat::Schema => write!(f, "schema"),
        }
    }
}

// ---------------------------------------------------------------------------
// Document shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct LegacyDocument {
    #[serde(rename = "Id", default = "Uuid::new_v4")]
    id: Uuid,
    #[serde(rename = "StartupItem", default)]
    startup_item: Option<String>,
    #[serde(rename = "Projects", default)]
    projects: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SchemaDocument {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    startup: Option<String>,
    #[serde(default)]
    projects: Vec<SchemaProject>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    folders: Vec<SchemaFolder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    migrated_from: Option<String>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SchemaProject {
    name: String,
    path: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SchemaFolder {
    name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    folders: Vec<SchemaFolder>,
}

// ---------------------------------------------------------------------------
// Sniff
// ---------------------------------------------------------------------------

/// Detects the format of the document at `path` from its first non-blank line.
///
/// Anything without the schema marker is treated as legacy; whether it
/// actually parses is decided later by [`read_legacy`].
pub fn sniff(path: &Path) -> Result<SolutionFormat, SolutionError> {
    let file = File::open(path).map_err(|e| io_err(path, e))?;
    let mut head = Vec::new();
    file.take(SNIFF_LIMIT)
        .read_to_end(&mut head)
        .map_err(|e| io_err(path, e))?;

    let text = String::from_utf8_lossy(&head);
    let first = text
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty());

    Ok(match first {
        Some(line) if line == SCHEMA_MARKER => SolutionFormat::Schema,
        _ => SolutionFormat::Legacy,
    })
}

// ---------------------------------------------------------------------------
// Legacy
// ---------------------------------------------------------------------------

/// Reads a legacy document into a solution shell: references and startup
/// name populated, no items.
pub fn read_legacy(path: &Path) -> Result<Solution, SolutionError> {
    let location = document_location(path)?;
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let doc: LegacyDocument =
        serde_json::from_str(contents.trim_start_matches('\u{feff}')).map_err(|e| {
            SolutionError::LegacyParse {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

    let mut solution = Solution::shell(SolutionId::from(doc.id), location, SolutionFormat::Legacy);
    solution.set_project_references(doc.projects);
    solution.set_startup_item_name(doc.startup_item);
    Ok(solution)
}

pub(crate) fn write_legacy(path: &Path, solution: &Solution) -> Result<(), SolutionError> {
    let doc = LegacyDocument {
        id: solution.id().0,
        startup_item: solution.startup_item_name().map(str::to_owned),
        projects: solution.project_references().to_vec(),
    };
    let json = serde_json::to_string_pretty(&doc)?;
    write_atomic(path, &json)
}

// ---------------------------------------------------------------------------
// New schema
// ---------------------------------------------------------------------------

/// Reads a new-schema document into a solution shell: references, startup
/// name and folders populated, no projects.
pub fn read_schema(path: &Path) -> Result<Solution, SolutionError> {
    let location = document_location(path)?;
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let doc: SchemaDocument =
        serde_yaml::from_str(&contents).map_err(|e| SolutionError::SchemaParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut solution = Solution::shell(SolutionId::from(doc.id), location, SolutionFormat::Schema);
    solution.set_project_references(
        doc.projects
            .into_iter()
            .map(|p| p.path)
            .collect(),
    );
    solution.set_startup_item_name(doc.startup);
    if let Some(legacy) = doc.migrated_from {
        solution.set_migrated_from(legacy);
    }
    for folder in doc.folders {
        solution.attach_loaded(SolutionItem::Folder(build_folder(folder)));
    }
    Ok(solution)
}

pub(crate) fn write_schema(path: &Path, solution: &Solution) -> Result<(), SolutionError> {
    let projects = solution
        .project_references()
        .iter()
        .map(|reference| {
            let name = solution
                .projects()
                .find(|p| solution.relative_reference(p.location()) == *reference)
                .map(|p| p.name().to_owned())
                .unwrap_or_else(|| reference_stem(reference));
            SchemaProject {
                name,
                path: reference.clone(),
            }
        })
        .collect();

    let folders = solution
        .items()
        .iter()
        .filter_map(SolutionItem::as_folder)
        .map(schema_folder)
        .collect();

    let doc = SchemaDocument {
        id: solution.id().0,
        startup: solution.startup_item_name().map(str::to_owned),
        projects,
        folders,
        migrated_from: solution.migrated_from().map(str::to_owned),
        updated_at: Utc::now(),
    };
    let yaml = serde_yaml::to_string(&doc)?;
    write_atomic(path, &format!("{SCHEMA_MARKER}\n{yaml}"))
}

fn build_folder(doc: SchemaFolder) -> SolutionFolder {
    let mut folder = SolutionFolder::new(doc.name);
    for child in doc.folders {
        folder.add_item(SolutionItem::Folder(build_folder(child)));
    }
    folder
}

fn schema_folder(folder: &SolutionFolder) -> SchemaFolder {
    SchemaFolder {
        name: folder.name().to_owned(),
        folders: folder
            .items()
            .iter()
            .filter_map(SolutionItem::as_folder)
            .map(schema_folder)
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Absolute, normalised location of a document path.
fn document_location(path: &Path) -> Result<PathBuf, SolutionError> {
    if path.file_stem().is_none() {
        return Err(SolutionError::NotASolutionFile {
            path: path.to_path_buf(),
        });
    }
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| io_err(path, e))?
            .join(path)
    };
    Ok(paths::normalize(&absolute))
}

fn reference_stem(reference: &str) -> String {
    paths::to_platform_path(reference)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| reference.to_owned())
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), SolutionError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| SolutionError::NotASolutionFile {
            path: path.to_path_buf(),
        })?;
    let tmp = path.with_file_name(format!("{file_name}.tmp"));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    std::fs::write(&tmp, contents).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::testing::StubProject;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn sniff_detects_schema_marker() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("demo.sln");
        fs::write(&path, format!("\n{SCHEMA_MARKER}\nid: x\n")).expect("write");
        assert_eq!(sniff(&path).expect("sniff"), SolutionFormat::Schema);
    }

    #[test]
    fn sniff_treats_everything_else_as_legacy() {
        let dir = TempDir::new().expect("tempdir");
        let json = dir.path().join("demo.asln");
        fs::write(&json, r#"{"Projects": []}"#).expect("write");
        assert_eq!(sniff(&json).expect("sniff"), SolutionFormat::Legacy);

        let binary = dir.path().join("junk.asln");
        fs::write(&binary, [0xff, 0xfe, 0x00, 0x01]).expect("write");
        assert_eq!(sniff(&binary).expect("sniff"), SolutionFormat::Legacy);
    }

    #[test]
    fn sniff_missing_file_is_io_error() {
        let dir = TempDir::new().expect("tempdir");
        let err = sniff(&dir.path().join("absent.sln")).unwrap_err();
        assert!(matches!(err, SolutionError::Io { .. }));
    }

    #[test]
    fn legacy_read_populates_shell() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("demo.asln");
        fs::write(
            &path,
            r#"{
  "StartupItem": "app",
  "Projects": ["libA\\libA.proj", "app/app.proj"],
  "Id": "6f1c3a52-6c55-4b8e-9d7c-0d8f0f5b0c11",
  "Items": []
}"#,
        )
        .expect("write");

        let s = read_legacy(&path).expect("read");
        assert_eq!(s.name(), "demo");
        assert_eq!(s.format(), SolutionFormat::Legacy);
        assert_eq!(s.startup_item_name(), Some("app"));
        assert_eq!(s.project_references().len(), 2);
        assert!(s.items().is_empty());
        assert_eq!(s.id().0.to_string(), "6f1c3a52-6c55-4b8e-9d7c-0d8f0f5b0c11");
    }

    #[test]
    fn legacy_read_rejects_malformed_json() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("demo.asln");
        fs::write(&path, "{ not json").expect("write");
        let err = read_legacy(&path).unwrap_err();
        assert!(matches!(err, SolutionError::LegacyParse { .. }));
        assert!(err.to_string().contains("demo.asln"));
    }

    #[test]
    fn schema_save_writes_marker_and_names() {
        let dir = TempDir::new().expect("tempdir");
        let mut s = Solution::create(dir.path(), "demo", SolutionFormat::Schema);
        let app = dir.path().join("app").join("app.proj");
        let id = s.add_project(StubProject::boxed("app", &app)).id().expect("added");
        s.set_startup_project(Some(id)).expect("startup");
        s.attach_loaded(SolutionItem::Folder(SolutionFolder::new("docs")));

        let path = s.save().expect("save");
        let text = fs::read_to_string(&path).expect("read back");
        assert!(text.starts_with(SCHEMA_MARKER));
        assert!(text.contains("app/app.proj"));
        assert!(text.contains("startup: app"));
        assert!(!path.with_file_name("demo.sln.tmp").exists());

        let back = read_schema(&path).expect("read schema");
        assert_eq!(back.id(), s.id());
        assert_eq!(back.project_references(), ["app/app.proj"]);
        assert_eq!(back.startup_item_name(), Some("app"));
        assert_eq!(back.items().len(), 1, "folder restored, projects left to the loader");
    }

    #[test]
    fn legacy_save_normalises_references() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("old.asln");
        fs::write(&path, r#"{"Projects": ["sub\\x.proj", "./y/y.proj"]}"#).expect("write");
        let mut s = read_legacy(&path).expect("read");
        s.save().expect("save");
        let again = read_legacy(&path).expect("reread");
        assert_eq!(again.project_references(), ["sub/x.proj", "y/y.proj"]);
        assert_eq!(again.startup_item_name(), None);
    }
}
