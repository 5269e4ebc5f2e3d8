//! Issue types reported by the validator and the scanning stages.
//!
//! Each issue is self-contained: the reporter (CLI or MCP) needs nothing else
//! to display it.

use enum_dispatch::enum_dispatch;

use crate::core::{Occurrence, SourceWarning};

// ============================================================
// Severity and Rule
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    DuplicateText,
    LeftoverDuplicate,
    BrokenReference,
    DanglingCanonical,
    ChainedMapping,
    UnreadableSource,
}

impl Rule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::DuplicateText => "duplicate-text",
            Rule::LeftoverDuplicate => "leftover-duplicate",
            Rule::BrokenReference => "broken-reference",
            Rule::DanglingCanonical => "dangling-canonical",
            Rule::ChainedMapping => "chained-mapping",
            Rule::UnreadableSource => "unreadable-source",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================
// Issue Types - Catalogs
// ============================================================

/// Several base keys carry the same display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateTextIssue {
    pub catalog_path: String,
    pub text: String,
    /// Group members in catalog order, canonical first.
    pub keys: Vec<String>,
}

/// A key the refactor map marks as duplicate is still declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftoverDuplicateIssue {
    pub catalog_path: String,
    pub key: String,
    pub canonical: String,
}

// ============================================================
// Issue Types - Source Code
// ============================================================

/// Source references a key the base catalog does not declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenReferenceIssue {
    pub occurrence: Occurrence,
    pub base_locale: String,
}

/// A source file was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableSourceIssue {
    pub path: String,
    pub error: String,
}

impl From<&SourceWarning> for UnreadableSourceIssue {
    fn from(warning: &SourceWarning) -> Self {
        Self {
            path: warning.path.clone(),
            error: warning.error.clone(),
        }
    }
}

// ============================================================
// Issue Types - Refactor Map
// ============================================================

/// A canonical key of the refactor map is missing from the base catalog
/// while the source still references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingCanonicalIssue {
    pub map_path: String,
    pub canonical: String,
    pub duplicates: Vec<String>,
}

/// A key is both a duplicate and a canonical target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainedMappingIssue {
    pub map_path: String,
    pub key: String,
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    DuplicateText(DuplicateTextIssue),
    LeftoverDuplicate(LeftoverDuplicateIssue),
    BrokenReference(BrokenReferenceIssue),
    UnreadableSource(UnreadableSourceIssue),
    DanglingCanonical(DanglingCanonicalIssue),
    ChainedMapping(ChainedMappingIssue),
}

// ============================================================
// Report Trait
// ============================================================

pub enum ReportLocation<'a> {
    /// A call in a source file, with its line for context display.
    Source(&'a Occurrence),
    /// A whole file (catalog, map artifact, unreadable source).
    File { path: &'a str },
}

impl ReportLocation<'_> {
    pub fn path(&self) -> &str {
        match self {
            ReportLocation::Source(occurrence) => &occurrence.file,
            ReportLocation::File { path } => path,
        }
    }
}

/// Common interface used by the reporters; dispatched statically over [`Issue`].
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message (key, text or error).
    fn message(&self) -> String;

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    fn hint(&self) -> Option<&str> {
        None
    }
}

impl Report for DuplicateTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.catalog_path,
        }
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn rule(&self) -> Rule {
        Rule::DuplicateText
    }

    fn details(&self) -> Option<String> {
        Some(format!("shared by keys: {}", self.keys.join(", ")))
    }

    fn hint(&self) -> Option<&str> {
        Some("run `keyfold dedup` to merge them")
    }
}

impl Report for LeftoverDuplicateIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.catalog_path,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn rule(&self) -> Rule {
        Rule::LeftoverDuplicate
    }

    fn details(&self) -> Option<String> {
        Some(format!("mapped to canonical key \"{}\"", self.canonical))
    }
}

impl Report for BrokenReferenceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.occurrence)
    }

    fn message(&self) -> String {
        self.occurrence.key.clone()
    }

    fn rule(&self) -> Rule {
        Rule::BrokenReference
    }

    fn details(&self) -> Option<String> {
        Some(format!("not declared in base catalog '{}'", self.base_locale))
    }
}

impl Report for UnreadableSourceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File { path: &self.path }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::UnreadableSource
    }
}

impl Report for DanglingCanonicalIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.map_path,
        }
    }

    fn message(&self) -> String {
        self.canonical.clone()
    }

    fn rule(&self) -> Rule {
        Rule::DanglingCanonical
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "canonical for {} but missing from the base catalog",
            self.duplicates.join(", ")
        ))
    }
}

impl Report for ChainedMappingIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.map_path,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn rule(&self) -> Rule {
        Rule::ChainedMapping
    }

    fn details(&self) -> Option<String> {
        Some("key is both a duplicate and a canonical target".to_string())
    }
}
