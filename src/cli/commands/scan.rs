use anyhow::Result;

use super::{
    CommandResult, CommandSummary, ScanSummary,
    helper::{finish, load_project},
};
use crate::{cli::args::CommonArgs, core::Pipeline};

pub fn scan(args: CommonArgs) -> Result<CommandResult> {
    let project = load_project(&args)?;
    let sources = Pipeline::new(&project.workspace, true).scan();

    let summary = ScanSummary {
        files_scanned: sources.files_scanned,
        keys: sources.index.len(),
        occurrences: sources.index.total_occurrences(),
        files_with_references: sources.index.file_count(),
    };
    Ok(finish(
        CommandSummary::Scan(summary),
        true,
        sources.warnings,
        Vec::new(),
    ))
}
