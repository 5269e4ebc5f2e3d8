use anyhow::Result;

use super::{
    CommandResult, CommandSummary,
    helper::{finish, load_project},
};
use crate::{cli::args::StageArgs, core::Pipeline};

pub fn sync(args: StageArgs) -> Result<CommandResult> {
    let project = load_project(&args.common)?;
    let mut pipeline = Pipeline::new(&project.workspace, args.dry_run);

    let mut catalogs = pipeline.load_catalogs()?;
    let report = pipeline.sync(&mut catalogs)?;

    let written = pipeline.written().to_vec();
    Ok(finish(
        CommandSummary::Sync(report),
        args.dry_run,
        Vec::new(),
        written,
    ))
}
