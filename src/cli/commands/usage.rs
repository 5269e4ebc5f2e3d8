use anyhow::Result;

use super::{
    CommandResult, CommandSummary,
    helper::{finish, load_project},
};
use crate::{
    cli::args::UsageArgs,
    core::{Pipeline, UsageReport},
};

pub fn usage(args: UsageArgs) -> Result<CommandResult> {
    let project = load_project(&args.common)?;
    let pipeline = Pipeline::new(&project.workspace, true);

    let catalogs = pipeline.load_catalogs()?;
    let sources = pipeline.scan();
    let report = UsageReport::build(&sources.index, &catalogs.base, args.limit);

    Ok(finish(
        CommandSummary::Usage(report),
        true,
        sources.warnings,
        Vec::new(),
    ))
}
