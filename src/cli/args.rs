//! Command-line argument definitions for stallplan
//!
//! This module defines the complete CLI interface using the clap derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::app::models::SortOrder;

/// CLI arguments for the stallplan record manager
///
/// Imports breeding-sow records from delimited planner exports into a
/// durable local store and serves them grouped by ventil station.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "stallplan",
    version,
    about = "Import and query breeding-sow records grouped by ventil station",
    long_about = "Imports semicolon-delimited planner exports (DB Sauenplaner and compatible \
                  formats) into a deduplicated local store with a six-month retention window, \
                  derives a traffic-light state per record, and serves per-ventil record lists."
)]
pub struct Args {
    /// Override the application data directory
    ///
    /// Defaults to the platform user data directory, e.g.
    /// ~/.local/share/stallplan on Linux.
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a planner export into the store
    Import(ImportArgs),
    /// List the records assigned to one ventil
    Show(ShowArgs),
    /// Look up a single record by ear tag number
    Lookup(LookupArgs),
    /// Print the import history
    History,
    /// Print store statistics
    Stats,
    /// Manage column configuration profiles
    Config(ConfigArgs),
    /// Empty the store and the import history
    Clear(ClearArgs),
}

/// Arguments for the import command
#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Path to the delimited export file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Use a saved column profile instead of the active configuration
    #[arg(short = 'p', long = "profile", value_name = "NAME")]
    pub profile: Option<String>,

    /// Suppress the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the show command
#[derive(Debug, Clone, Parser)]
pub struct ShowArgs {
    /// Ventil identifier: a bare number or a detected code like VENTIL-042
    #[arg(value_name = "VENTIL")]
    pub ventil: String,

    /// Sort order of the record list
    #[arg(short = 's', long = "sort", value_enum, default_value_t = SortOrderArg::EarTag)]
    pub sort: SortOrderArg,
}

/// Arguments for the lookup command
#[derive(Debug, Clone, Parser)]
pub struct LookupArgs {
    /// Ear tag number of the record
    #[arg(value_name = "EAR_TAG")]
    pub ear_tag: String,
}

/// Arguments for the clear command
#[derive(Debug, Clone, Parser)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,
}

/// Configuration subcommands
#[derive(Debug, Clone, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommands {
    /// Print the active column configuration
    Show,
    /// Auto-detect a configuration from a file's header row
    Detect(DetectArgs),
    /// List saved configuration profiles
    Profiles,
    /// Save the active configuration as a named profile
    Save {
        /// Profile name
        name: String,
    },
    /// Load a named profile as the active configuration
    Load {
        /// Profile name
        name: String,
    },
    /// Delete a named profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Arguments for config detect
#[derive(Debug, Clone, Parser)]
pub struct DetectArgs {
    /// File whose header row is analyzed
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Make the detected configuration the active one
    #[arg(long)]
    pub save: bool,
}

/// CLI spelling of the serving-index sort orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrderArg {
    /// Ear tag ascending
    EarTag,
    /// Ear tag descending
    EarTagDesc,
    /// Oldest mating date first
    DateOldest,
    /// Newest mating date first
    DateNewest,
    /// Most severe traffic light first
    Severity,
    /// Least severe traffic light first
    SeverityAsc,
}

impl From<SortOrderArg> for SortOrder {
    fn from(arg: SortOrderArg) -> Self {
        match arg {
            SortOrderArg::EarTag => SortOrder::EarTagAscending,
            SortOrderArg::EarTagDesc => SortOrder::EarTagDescending,
            SortOrderArg::DateOldest => SortOrder::EventDateOldest,
            SortOrderArg::DateNewest => SortOrder::EventDateNewest,
            SortOrderArg::Severity => SortOrder::SeverityDescending,
            SortOrderArg::SeverityAsc => SortOrder::SeverityAscending,
        }
    }
}
