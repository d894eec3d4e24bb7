//! slnkit core library: solution model, sorted item collection, document codecs.
//!
//! Public API surface:
//! - [`types`]: identifiers and small value types
//! - [`item`]: [`Project`] capability trait, [`SolutionFolder`], [`SolutionItem`]
//! - [`collection`]: [`SortedItemCollection`]
//! - [`solution`]: the [`Solution`] root aggregate
//! - [`document`]: legacy / new-schema codecs and format sniffing
//! - [`project_type`]: the [`ProjectType`] collaborator contract
//! - [`paths`]: document path normalisation
//! - [`error`]: [`SolutionError`]

pub mod collection;
pub mod document;
pub mod error;
pub mod item;
pub mod paths;
pub mod project_type;
pub mod solution;
pub mod types;

pub use collection::SortedItemCollection;
pub use document::{SolutionFormat, LEGACY_EXTENSION, SCHEMA_EXTENSION};
pub use error::{ProjectLoadError, SolutionError};
pub use item::{Project, SolutionFolder, SolutionItem};
pub use project_type::ProjectType;
pub use solution::{AddOutcome, Solution};
pub use types::{ItemId, ItemKind, ProjectSummary, SolutionId, SourceFile};
