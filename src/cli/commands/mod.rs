//! Command implementations for the stallplan CLI
//!
//! Each command lives in its own module; this module resolves the data
//! directory and dispatches.

pub mod clear;
pub mod config;
pub mod history;
pub mod import;
pub mod show;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::app::services::sow_store::{self, SowStore};
use crate::cli::args::{Args, Commands};

/// Dispatch the parsed CLI arguments to the matching command handler
pub fn run(args: Args) -> Result<()> {
    let data_dir = resolve_data_dir(&args)?;

    let Some(command) = args.command else {
        // main() prints help before calling run; nothing to do here
        return Ok(());
    };

    match command {
        Commands::Import(import_args) => import::run_import(&data_dir, import_args),
        Commands::Show(show_args) => show::run_show(&data_dir, show_args),
        Commands::Lookup(lookup_args) => show::run_lookup(&data_dir, lookup_args),
        Commands::History => history::run_history(&data_dir),
        Commands::Stats => history::run_stats(&data_dir),
        Commands::Config(config_args) => config::run_config(&data_dir, config_args),
        Commands::Clear(clear_args) => clear::run_clear(&data_dir, clear_args),
    }
}

/// The data directory from the CLI override or the platform default
fn resolve_data_dir(args: &Args) -> Result<PathBuf> {
    match &args.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => sow_store::default_data_dir().context("could not determine user data directory"),
    }
}

/// Open the store under the resolved data directory
pub(crate) fn open_store(data_dir: &std::path::Path) -> Result<SowStore> {
    SowStore::open(data_dir)
        .with_context(|| format!("opening store under {}", data_dir.display()))
}
