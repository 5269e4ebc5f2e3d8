use anyhow::Result;

use super::{
    CommandResult, CommandSummary,
    helper::{finish, load_project},
};
use crate::{cli::args::CommonArgs, core::Pipeline};

/// Validate on-disk catalogs against a fresh scan and the persisted refactor map.
pub fn validate(args: CommonArgs) -> Result<CommandResult> {
    let project = load_project(&args)?;
    let pipeline = Pipeline::new(&project.workspace, true);

    let catalogs = pipeline.load_catalogs()?;
    let sources = pipeline.scan();
    let map = pipeline.load_refactor_map()?;
    let report = pipeline.check(&catalogs, &sources.index, map.as_ref());

    Ok(finish(
        CommandSummary::Validate(report),
        true,
        sources.warnings,
        Vec::new(),
    ))
}
