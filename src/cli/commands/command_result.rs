use std::path::PathBuf;

use crate::{
    cli::exit_status::ExitStatus,
    core::{
        AddReport, DedupOutcome, PipelineReport, PruneReport, SourceWarning, SyncReport,
        UsageReport, ValidationReport,
    },
};

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Dedup(DedupOutcome),
    Prune(PruneReport),
    Sync(SyncReport),
    Validate(ValidationReport),
    Run(Box<PipelineReport>),
    Add(AddSummary),
    Usage(UsageReport),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub keys: usize,
    pub occurrences: usize,
    pub files_with_references: usize,
}

#[derive(Debug)]
pub struct AddSummary {
    pub report: AddReport,
    pub source: PathBuf,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running keyfold commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// True when nothing was written.
    pub dry_run: bool,
    /// Source files that were skipped.
    pub warnings: Vec<SourceWarning>,
    /// Catalog locales written to disk.
    pub written: Vec<String>,
}

impl CommandResult {
    /// Validation failures exit with 1; everything else that returned here succeeded.
    pub fn exit_status(&self) -> ExitStatus {
        let passed = match &self.summary {
            CommandSummary::Validate(report) => report.passed(),
            CommandSummary::Run(report) => report.passed(),
            _ => true,
        };
        if passed {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}
