use anyhow::Result;

use super::{
    CommandResult, CommandSummary,
    helper::{finish, load_project},
};
use crate::{cli::args::StageArgs, core::Pipeline};

pub fn prune(args: StageArgs) -> Result<CommandResult> {
    let project = load_project(&args.common)?;
    let mut pipeline = Pipeline::new(&project.workspace, args.dry_run);

    let mut catalogs = pipeline.load_catalogs()?;
    let sources = pipeline.scan();
    let report = pipeline.prune(&mut catalogs, &sources.index)?;

    let written = pipeline.written().to_vec();
    Ok(finish(
        CommandSummary::Prune(report),
        args.dry_run,
        sources.warnings,
        written,
    ))
}
