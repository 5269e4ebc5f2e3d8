use anyhow::{Result, bail};

use super::{
    args::Command,
    commands::{
        CommandResult, add::add, dedup::dedup, init::init, pipeline::run_pipeline, prune::prune,
        scan::scan, sync::sync, usage::usage, validate::validate,
    },
};

/// Dispatch a parsed command to its handler.
pub fn run(command: Command) -> Result<CommandResult> {
    match command {
        Command::Scan(args) => scan(args),
        Command::Dedup(args) => dedup(args),
        Command::Prune(args) => prune(args),
        Command::Sync(args) => sync(args),
        Command::Validate(args) => validate(args),
        Command::Run(args) => run_pipeline(args),
        Command::Add(args) => add(args),
        Command::Usage(args) => usage(args),
        Command::Init(args) => init(args),
        Command::Serve(_) => {
            // Serve command is handled in main.rs before calling run()
            bail!("Serve command should be handled before run()")
        }
    }
}
