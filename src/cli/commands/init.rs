use std::fs;

use anyhow::{Context, Result, bail};

use super::{
    CommandResult, CommandSummary, InitSummary,
    helper::{finish, start_dir},
};
use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, default_config_json},
};

pub fn init(args: CommonArgs) -> Result<CommandResult> {
    let config_path = start_dir(&args)?.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(&config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    Ok(finish(
        CommandSummary::Init(InitSummary { path: config_path }),
        false,
        Vec::new(),
        Vec::new(),
    ))
}
