use std::process::ExitCode;

use anyhow::Result;

mod args;
pub mod commands;
mod exit_status;
mod logging;
pub mod report;
mod run;

pub use args::{AddArgs, Arguments, Command, CommonArgs, StageArgs, UsageArgs};
pub use exit_status::ExitStatus;
pub use logging::{LOG_ENV, init_tracing};

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();

    let Some(Arguments {
        command: Some(command),
    }) = args.with_command_or_help()
    else {
        return Ok(ExitStatus::Success.into());
    };

    let result = run::run(command)?;
    report::print(&result, verbose);

    Ok(result.exit_status().into())
}
