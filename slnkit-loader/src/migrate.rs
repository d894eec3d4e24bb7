//! One-way migration from the legacy document to the new schema.
//!
//! The migrated solution is written next to the legacy file under the same
//! name. The legacy file is left exactly as it was; the operator is told to
//! delete it by hand.

use std::collections::HashMap;
use std::path::PathBuf;

use slnkit_core::{ItemId, Solution, SolutionFormat, SolutionItem};

use crate::error::LoadError;
use crate::notify::Notifier;

/// A completed migration.
#[derive(Debug)]
pub struct Migration {
    /// The new-schema solution, already saved.
    pub solution: Solution,
    /// Untouched legacy document.
    pub legacy_path: PathBuf,
    /// Freshly written new-schema document.
    pub schema_path: PathBuf,
}

pub struct FormatMigrator<'a> {
    notifier: &'a dyn Notifier,
}

impl<'a> FormatMigrator<'a> {
    pub fn new(notifier: &'a dyn Notifier) -> Self {
        Self { notifier }
    }

    /// Converts a fully resolved solution and persists the result.
    ///
    /// Only project-kind items are carried over; folders are dropped. The
    /// startup project keeps its identity.
    pub fn migrate(&self, legacy: Solution) -> Result<Migration, LoadError> {
        let legacy_path = legacy.location().to_path_buf();
        let mut migrated = Solution::create(
            legacy.current_directory(),
            &legacy.name(),
            SolutionFormat::Schema,
        );
        if migrated.document_path() == legacy_path {
            return Err(LoadError::MigrationWouldOverwrite { path: legacy_path });
        }
        if let Some(file_name) = legacy_path.file_name() {
            migrated.set_migrated_from(file_name.to_string_lossy());
        }

        let startup = legacy.startup_project_id();
        let mut carried: HashMap<ItemId, ItemId> = HashMap::new();
        for item in legacy.into_items() {
            match item {
                SolutionItem::Project(project) => {
                    let old_id = project.id();
                    if let Some(new_id) = migrated.add_project(project).id() {
                        carried.insert(old_id, new_id);
                    }
                }
                other @ SolutionItem::Folder(_) => {
                    tracing::debug!("migration drops {} '{}'", other.kind(), other.name());
                }
            }
        }
        migrated.set_startup_project(startup.and_then(|id| carried.get(&id).copied()))?;

        let schema_path = migrated.save()?;
        tracing::info!(
            "migrated {} to {}",
            legacy_path.display(),
            schema_path.display()
        );
        self.notifier.notify(&format!(
            "Migrated {} to {}. Opening the legacy file again will overwrite the migrated solution.",
            legacy_path.display(),
            schema_path.display()
        ));
        self.notifier.notify(&format!(
            "Delete {} once you are happy with the migration.",
            legacy_path.display()
        ));

        Ok(Migration {
            solution: migrated,
            legacy_path,
            schema_path,
        })
    }
}
