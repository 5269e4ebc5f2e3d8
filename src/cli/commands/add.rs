use std::fs;

use anyhow::{Context, Result};

use super::{
    AddSummary, CommandResult, CommandSummary,
    helper::{finish, load_project},
};
use crate::{
    cli::args::AddArgs,
    core::{EntryBatch, Pipeline, add_entries},
};

pub fn add(args: AddArgs) -> Result<CommandResult> {
    let project = load_project(&args.common)?;
    let content = fs::read_to_string(&args.entries)
        .with_context(|| format!("Failed to read entries file: {:?}", args.entries))?;
    let batch: EntryBatch = serde_json::from_str(&content).with_context(|| {
        format!(
            "Failed to parse entries file {:?}: expected {{\"<locale>\": {{\"<key>\": \"<text>\"}}}}",
            args.entries
        )
    })?;

    let mut pipeline = Pipeline::new(&project.workspace, args.dry_run);
    let mut catalogs = pipeline.load_catalogs()?;
    let report = add_entries(&mut catalogs, &batch);

    let changed: Vec<String> = report
        .changed_locales()
        .into_iter()
        .map(str::to_string)
        .collect();
    pipeline.persist(&catalogs, &changed)?;

    let written = pipeline.written().to_vec();
    Ok(finish(
        CommandSummary::Add(AddSummary {
            report,
            source: args.entries,
        }),
        args.dry_run,
        Vec::new(),
        written,
    ))
}
