use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary};
use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{SourceWarning, Workspace},
};

/// The resolved project a command operates on.
pub struct Project {
    pub workspace: Workspace,
    pub config_path: Option<PathBuf>,
}

/// Directory the command starts from: `--root` or the current directory.
pub fn start_dir(common: &CommonArgs) -> Result<PathBuf> {
    let dir = match &common.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    std::path::absolute(&dir).with_context(|| format!("Invalid root directory: {:?}", dir))
}

/// Load the config (searching upward from the start directory), apply CLI
/// overrides and resolve the workspace.
///
/// The project root is the directory of the config file when one is found.
pub fn load_project(common: &CommonArgs) -> Result<Project> {
    let start = start_dir(common)?;
    let loaded = load_config(&start)?;
    let root = loaded
        .path
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or(start);

    let config = apply_overrides(loaded.config, common);
    config.validate()?;

    tracing::debug!(
        event = "project_loaded",
        root = %root.display(),
        config = ?loaded.path,
        base_locale = config.base_locale.as_str()
    );
    Ok(Project {
        workspace: Workspace::from_config(&root, &config),
        config_path: loaded.path,
    })
}

fn apply_overrides(mut config: Config, common: &CommonArgs) -> Config {
    if let Some(locale) = &common.base_locale {
        config.base_locale = locale.clone();
    }
    if let Some(dir) = &common.catalog_dir {
        config.catalog_dir = dir.clone();
    }
    config
}

pub fn finish(
    summary: CommandSummary,
    dry_run: bool,
    mut warnings: Vec<SourceWarning>,
    written: Vec<String>,
) -> CommandResult {
    warnings.sort_by(|a, b| a.path.cmp(&b.path));

    CommandResult {
        summary,
        dry_run,
        warnings,
        written,
    }
}
