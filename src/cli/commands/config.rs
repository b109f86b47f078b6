//! Config command: inspect and manage column configuration profiles

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::cli::args::{ConfigArgs, ConfigCommands, DetectArgs};
use crate::config::{ColumnConfig, ConfigStore};

/// Run the config subcommands
pub fn run_config(data_dir: &Path, args: ConfigArgs) -> Result<()> {
    let config_store = ConfigStore::open(data_dir).context("opening configuration store")?;

    match args.command {
        ConfigCommands::Show => {
            print_config(&config_store.load_current());
            Ok(())
        }
        ConfigCommands::Detect(detect_args) => run_detect(&config_store, detect_args),
        ConfigCommands::Profiles => {
            let profiles = config_store.list_profiles()?;
            if profiles.is_empty() {
                println!("No saved profiles");
            } else {
                for profile in profiles {
                    println!("{profile}");
                }
            }
            Ok(())
        }
        ConfigCommands::Save { name } => {
            let current = config_store.load_current();
            config_store
                .save_profile(&name, &current)
                .with_context(|| format!("saving profile '{name}'"))?;
            println!("Saved profile '{name}'");
            Ok(())
        }
        ConfigCommands::Load { name } => {
            let config = config_store
                .load_profile(&name)
                .with_context(|| format!("loading profile '{name}'"))?;
            println!("Active configuration is now '{}'", config.name);
            Ok(())
        }
        ConfigCommands::Delete { name } => {
            if config_store.delete_profile(&name)? {
                println!("Deleted profile '{name}'");
            } else {
                println!("No profile named '{name}'");
            }
            Ok(())
        }
    }
}

fn run_detect(config_store: &ConfigStore, args: DetectArgs) -> Result<()> {
    let base = config_store.load_current();
    let detected = config_store
        .detect_from_csv(&args.file, &base)
        .with_context(|| format!("detecting columns from {}", args.file.display()))?;

    print_config(&detected);

    match detected.validate() {
        Ok(()) => {
            if args.save {
                config_store.save_current(&detected)?;
                println!("{}", "Detected configuration is now active".green());
            }
        }
        Err(e) => {
            println!(
                "{}",
                format!("Detected configuration is incomplete: {e}").yellow()
            );
            println!("Assign the missing roles manually before importing with it.");
        }
    }

    Ok(())
}

fn print_config(config: &ColumnConfig) {
    println!(
        "{} (delimiter '{}', {}, {})",
        config.name.bold(),
        config.delimiter,
        if config.has_header { "header row" } else { "no header" },
        config.encoding.name()
    );
    for column in &config.columns {
        println!(
            "  [{}] {:<20} {:?} {:?}{}",
            column.display_order,
            column.source_name,
            column.column_type,
            column.role,
            if column.visible { "" } else { " (hidden)" }
        );
    }
}
