use clap::Parser;
use stallplan::cli::{args::Args, commands};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Default to warnings only; RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {error:#}");
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Stallplan - Sow Record Import and Query Tool");
    println!("============================================");
    println!();
    println!("Import semicolon-delimited planner exports into a deduplicated local");
    println!("store and query records grouped by ventil station.");
    println!();
    println!("USAGE:");
    println!("    stallplan <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    import      Import a planner export into the store");
    println!("    show        List the records assigned to one ventil");
    println!("    lookup      Look up a single record by ear tag number");
    println!("    history     Print the import history");
    println!("    stats       Print store statistics");
    println!("    config      Manage column configuration profiles");
    println!("    clear       Empty the store and the import history");
    println!();
    println!("OPTIONS:");
    println!("    --data-dir <PATH>    Override the application data directory");
    println!("    -h, --help           Show help information");
    println!("    -V, --version        Show version information");
    println!();
    println!("Run 'stallplan <command> --help' for command-specific options.");
}
