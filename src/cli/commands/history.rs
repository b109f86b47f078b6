//! History and stats commands

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::open_store;

/// Run the history command: print the append-only import log
pub fn run_history(data_dir: &Path) -> Result<()> {
    let store = open_store(data_dir)?;
    let history = store.history();

    if history.is_empty() {
        println!("No imports yet");
        return Ok(());
    }

    for entry in &history {
        println!(
            "{}  {}  ({} records)",
            entry.imported_at.format("%Y-%m-%d %H:%M"),
            entry.source_file,
            entry.record_count
        );
    }
    println!("{} imports", history.len());

    Ok(())
}

/// Run the stats command: aggregate store statistics
pub fn run_stats(data_dir: &Path) -> Result<()> {
    let store = open_store(data_dir)?;
    let stats = store.stats();

    println!("{}", "Store".bold());
    println!("  records: {}", stats.total_records);
    println!("  ventils: {}", stats.total_ventils);
    println!("  imports: {}", stats.import_count);
    match stats.last_updated {
        Some(updated) => println!("  updated: {}", updated.format("%Y-%m-%d %H:%M")),
        None => println!("  updated: never"),
    }

    Ok(())
}
