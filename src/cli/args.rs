//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Report which catalog keys the source tree references
//! - `dedup`: Merge keys sharing a display text and rewrite their references
//! - `prune`: Remove keys no source file references
//! - `sync`: Align dependent catalogs with the base catalog
//! - `validate`: Run the structural checks
//! - `run`: The full pipeline (scan, dedup, prune, sync, check)
//! - `add`: Bulk-insert entries from a JSON file
//! - `usage`: Key usage ranking and unreferenced keys
//! - `init`: Write a default `.keyfoldrc.json`
//! - `serve`: Start the MCP server

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        self.common().is_some_and(|c| c.verbose)
    }

    pub fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Scan(args))
            | Some(Command::Validate(args))
            | Some(Command::Init(args))
            | Some(Command::Serve(args)) => Some(args),
            Some(Command::Dedup(cmd))
            | Some(Command::Prune(cmd))
            | Some(Command::Sync(cmd))
            | Some(Command::Run(cmd)) => Some(&cmd.common),
            Some(Command::Add(cmd)) => Some(&cmd.common),
            Some(Command::Usage(cmd)) => Some(&cmd.common),
            None => None,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root; the config file is searched upward from here (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Base locale (overrides config file)
    #[arg(long)]
    pub base_locale: Option<String>,

    /// Catalog directory (overrides config file)
    #[arg(long)]
    pub catalog_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments of the commands that change files.
#[derive(Debug, Clone, Args)]
pub struct StageArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Compute and report every change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// JSON file of the form {"<locale>": {"<key>": "<text>"}}
    pub entries: PathBuf,

    /// Report the insertions without writing catalogs
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct UsageArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of most-referenced keys to list
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report which catalog keys the source tree references
    Scan(CommonArgs),
    /// Merge keys with identical base text and rewrite their references
    Dedup(StageArgs),
    /// Remove keys that no source file references from every catalog
    Prune(StageArgs),
    /// Give every dependent catalog exactly the base catalog's keys
    Sync(StageArgs),
    /// Check catalogs, references and the refactor map for consistency
    Validate(CommonArgs),
    /// Run scan, dedup, prune, sync and validate in order
    Run(StageArgs),
    /// Insert or update catalog entries from a JSON file
    Add(AddArgs),
    /// Rank keys by reference count and list unreferenced ones
    Usage(UsageArgs),
    /// Initialize a new .keyfoldrc.json configuration file
    Init(CommonArgs),
    /// Start MCP server for AI coding agents
    Serve(CommonArgs),
}
