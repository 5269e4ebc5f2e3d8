use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    core::{CheckResult, DuplicateGroup, ValidationReport},
    issues::{Issue, Report, ReportLocation},
};

// ============================================================
// Tool Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConfigParams {
    /// Absolute path of the project root (where .keyfoldrc.json lives)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetLocalesParams {
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanUsageParams {
    pub project_root_path: String,
    /// Maximum number of keys to return (default 50, max 100)
    pub limit: Option<u32>,
    /// Number of keys to skip
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindDuplicatesParams {
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateParams {
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunPipelineParams {
    pub project_root_path: String,
    /// Write changes to disk. Defaults to false (dry run).
    pub apply: Option<bool>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub includes: Vec<String>,
    pub ignores: Vec<String>,
    pub extensions: Vec<String>,
    pub catalog_dir: String,
    pub base_locale: String,
    pub locales: Vec<String>,
    pub placeholder: String,
    pub technical_keys: Vec<String>,
    pub ignore_literals: Vec<String>,
    pub function_name: String,
    pub namespace: String,
    pub refactor_map_file: String,
    pub replacement_log_file: String,
}

impl From<crate::config::Config> for ConfigValues {
    fn from(c: crate::config::Config) -> Self {
        Self {
            includes: c.includes,
            ignores: c.ignores,
            extensions: c.extensions,
            catalog_dir: c.catalog_dir,
            base_locale: c.base_locale,
            locales: c.locales,
            placeholder: c.placeholder,
            technical_keys: c.technical_keys,
            ignore_literals: c.ignore_literals,
            function_name: c.function_name,
            namespace: c.namespace,
            refactor_map_file: c.refactor_map_file,
            replacement_log_file: c.replacement_log_file,
        }
    }
}

// ============================================================
// Locales Types (get_locales)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocalesResult {
    pub catalog_dir: String,
    pub base_locale: String,
    pub locales: Vec<LocaleInfo>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    pub locale: String,
    pub file_path: String,
    pub key_count: usize,
    pub is_base: bool,
}

// ============================================================
// Usage Types (scan_usage)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageScanResult {
    pub files_scanned: usize,
    pub total_keys: usize,
    pub total_occurrences: usize,
    /// Referenced keys the base catalog does not declare
    pub undeclared_count: usize,
    pub items: Vec<UsageItem>,
    pub pagination: Pagination,
}

/// A referenced key with every call site
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageItem {
    pub key: String,
    pub declared: bool,
    pub count: usize,
    pub occurrences: Vec<OccurrenceItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceItem {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

// ============================================================
// Duplicate Types (find_duplicates)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DuplicatesResult {
    pub base_locale: String,
    pub total_groups: usize,
    /// Keys that would be merged into a canonical key
    pub total_duplicates: usize,
    pub groups: Vec<DuplicateGroupItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateGroupItem {
    pub text: String,
    pub canonical: String,
    pub duplicates: Vec<String>,
}

impl From<&DuplicateGroup> for DuplicateGroupItem {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            text: group.text.clone(),
            canonical: group.canonical.clone(),
            duplicates: group.duplicates.clone(),
        }
    }
}

// ============================================================
// Validation Types (validate)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub passed: bool,
    pub checks: Vec<CheckItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckItem {
    pub name: String,
    pub description: String,
    pub passed: bool,
    /// Why the check did not run, if it was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
    pub issues: Vec<IssueItem>,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueItem {
    pub rule: String,
    pub severity: String,
    pub message: String,
    pub file_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&Issue> for IssueItem {
    fn from(issue: &Issue) -> Self {
        let location = issue.location();
        let (line, col) = match &location {
            ReportLocation::Source(occurrence) => (Some(occurrence.line), Some(occurrence.col)),
            ReportLocation::File { .. } => (None, None),
        };
        Self {
            rule: issue.rule().to_string(),
            severity: issue.severity().to_string(),
            message: issue.message(),
            file_path: location.path().to_string(),
            line,
            col,
            details: issue.details(),
        }
    }
}

impl From<&CheckResult> for CheckItem {
    fn from(result: &CheckResult) -> Self {
        Self {
            name: result.check.name().to_string(),
            description: result.check.description().to_string(),
            passed: result.passed(),
            skipped: result.skipped.clone(),
            issues: result.issues.iter().map(IssueItem::from).collect(),
        }
    }
}

impl From<&ValidationReport> for ValidationResult {
    fn from(report: &ValidationReport) -> Self {
        Self {
            passed: report.passed(),
            checks: report.checks.iter().map(CheckItem::from).collect(),
        }
    }
}

// ============================================================
// Pipeline Types (run_pipeline)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RunPipelineResult {
    pub dry_run: bool,
    pub passed: bool,
    pub files_scanned: usize,
    pub keys_referenced: usize,
    pub merged: Vec<DuplicateGroupItem>,
    pub references_rewritten: usize,
    pub files_changed: Vec<String>,
    /// Duplicates kept in the base because a referencing file could not be rewritten
    pub retained_duplicates: Vec<String>,
    pub pruned_keys: Vec<String>,
    /// Dependent locale → keys added and removed
    pub synced: BTreeMap<String, SyncItem>,
    pub validation: ValidationResult,
    /// Catalog locales written to disk
    pub written: Vec<String>,
    pub skipped_files: usize,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncItem {
    pub added: usize,
    pub removed: usize,
}

// ============================================================
// Common Types
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
