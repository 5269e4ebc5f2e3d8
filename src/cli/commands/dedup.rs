use anyhow::Result;

use super::{
    CommandResult, CommandSummary,
    helper::{finish, load_project},
};
use crate::{cli::args::StageArgs, core::Pipeline};

/// Scan, then canonicalize the base catalog and rewrite duplicate references.
pub fn dedup(args: StageArgs) -> Result<CommandResult> {
    let project = load_project(&args.common)?;
    let mut pipeline = Pipeline::new(&project.workspace, args.dry_run);

    let mut catalogs = pipeline.load_catalogs()?;
    let mut sources = pipeline.scan();
    let outcome = pipeline.dedup(&mut catalogs, &mut sources)?;

    let mut warnings = sources.warnings;
    warnings.extend(outcome.warnings.iter().cloned());
    let written = pipeline.written().to_vec();
    Ok(finish(
        CommandSummary::Dedup(outcome),
        args.dry_run,
        warnings,
        written,
    ))
}
