//! Clear command: full store reset

use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::cli::args::ClearArgs;

use super::open_store;

/// Run the clear command, prompting unless `--yes` was given
pub fn run_clear(data_dir: &Path, args: ClearArgs) -> Result<()> {
    if !args.yes && !confirm()? {
        println!("Aborted");
        return Ok(());
    }

    let store = open_store(data_dir)?;
    store.clear()?;
    println!("{}", "Store and import history cleared".green());

    Ok(())
}

fn confirm() -> Result<bool> {
    print!("Delete all records and the import history? [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}
