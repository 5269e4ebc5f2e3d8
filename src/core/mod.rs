//! The translation key consistency pipeline.
//!
//! Leaves first:
//!
//! - `catalog`: per-locale key→text catalogs and their store
//! - `scan`: call-form grammar, source discovery and the reference scanner
//! - `canonicalize`: duplicate-text groups and the refactor map
//! - `prune` / `sync`: catalog key-set maintenance
//! - `rewrite`: in-place replacement of duplicate references
//! - `validate`: structural checks
//! - `pipeline`: stage sequencing and dry-run handling

pub mod add;
pub mod canonicalize;
pub mod catalog;
pub mod pipeline;
pub mod prune;
pub mod refactor_map;
pub mod rewrite;
pub mod scan;
pub mod sync;
pub mod usage;
pub mod utils;
pub mod validate;
pub mod workspace;

pub use add::{AddReport, EntryBatch, add_entries};
pub use canonicalize::{Canonicalizer, DuplicateGroup};
pub use catalog::{CatalogSet, CatalogStore, LocaleCatalog, key_order};
pub use pipeline::{DedupOutcome, Pipeline, PipelineReport, SourceState, Stage};
pub use prune::PruneReport;
pub use refactor_map::RefactorMap;
pub use rewrite::{ReferenceRewriter, Replacement};
pub use scan::{CallForm, CallGrammar, ReferenceScanner, SourceWarning};
pub use sync::{LocaleSync, SyncReport};
pub use usage::{KeyUsage, Occurrence, UsageIndex, UsageReport};
pub use validate::{Check, CheckResult, ValidationReport, Validator};
pub use workspace::Workspace;
