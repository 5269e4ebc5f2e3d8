//! Reference scanning: which catalog keys does the source tree use?
//!
//! - `grammar`: the three call-forms and their shared literal pattern
//! - `heuristics`: plausible-key filter applied to captured literals
//! - `files`: source discovery (include dirs, ignores, extension allow-list)
//! - `scanner`: parallel scan producing a [`UsageIndex`](crate::core::UsageIndex)

mod files;
mod grammar;
mod heuristics;
mod scanner;

use serde::Serialize;

pub use files::{SourceFiles, SourceFilter};
pub use grammar::{CallForm, CallGrammar, CallMatch};
pub use heuristics::{BUILTIN_DENYLIST, KeyFilter};
pub use scanner::{ReferenceScanner, ScanOutput};

/// A source file (or directory) that was skipped.
///
/// Soft failure: the stage records it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceWarning {
    pub path: String,
    pub error: String,
}
