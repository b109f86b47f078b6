//! Import command: merge one export file into the store

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::cli::args::ImportArgs;
use crate::config::ConfigStore;

use super::open_store;

/// Run the import command
pub fn run_import(data_dir: &Path, args: ImportArgs) -> Result<()> {
    let config_store = ConfigStore::open(data_dir).context("opening configuration store")?;
    let config = match &args.profile {
        Some(name) => config_store
            .load_profile(name)
            .with_context(|| format!("loading profile '{name}'"))?,
        None => config_store.load_current(),
    };

    let store = open_store(data_dir)?;

    let outcome = if args.no_progress {
        store.import_file(&args.file, &config)
    } else {
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {pos} rows merged")
                .expect("static template"),
        );
        let outcome = store.import_file_with_progress(&args.file, &config, &progress);
        progress.finish_and_clear();
        outcome
    };
    let result = outcome.with_context(|| format!("importing {}", args.file.display()))?;

    println!(
        "{} {} added, {} updated, {} skipped",
        "Import complete:".green().bold(),
        result.added,
        result.updated,
        result.skipped
    );

    if result.skipped > 0 {
        println!(
            "{}",
            format!("{} rows could not be parsed and were skipped", result.skipped).yellow()
        );
    }

    Ok(())
}
