use anyhow::Result;

use super::{
    CommandResult, CommandSummary,
    helper::{finish, load_project},
};
use crate::{cli::args::StageArgs, core::Pipeline};

/// The full pipeline: scan, dedup, prune, sync, check.
pub fn run_pipeline(args: StageArgs) -> Result<CommandResult> {
    let project = load_project(&args.common)?;
    let mut report = Pipeline::new(&project.workspace, args.dry_run).run()?;

    let warnings = std::mem::take(&mut report.warnings);
    let written = report.written.clone();
    Ok(finish(
        CommandSummary::Run(Box::new(report)),
        args.dry_run,
        warnings,
        written,
    ))
}
