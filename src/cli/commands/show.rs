//! Show and lookup commands: query the serving index

use anyhow::{Result, bail};
use colored::{ColoredString, Colorize};
use std::path::Path;

use crate::app::models::{SowRecord, TrafficLight};
use crate::app::services::ventil_code::extract_ventil_number;
use crate::cli::args::{LookupArgs, ShowArgs};

use super::open_store;

/// Run the show command: list the records at one ventil
pub fn run_show(data_dir: &Path, args: ShowArgs) -> Result<()> {
    let Some(ventil_number) = extract_ventil_number(&args.ventil) else {
        bail!("'{}' is not a ventil number or a VENTIL-<n> code", args.ventil);
    };

    let store = open_store(data_dir)?;
    let records = store.records_for_ventil(ventil_number, args.sort.into());

    if records.is_empty() {
        println!("No records at ventil {ventil_number}");
        return Ok(());
    }

    println!("{}", format!("Ventil {ventil_number}").bold());
    for record in &records {
        print_record_line(record);
    }
    println!("{} records", records.len());

    Ok(())
}

/// Run the lookup command: one record by ear tag
pub fn run_lookup(data_dir: &Path, args: LookupArgs) -> Result<()> {
    let store = open_store(data_dir)?;

    match store.record_by_ear_tag(&args.ear_tag) {
        Some(record) => {
            print_record_line(&record);
            if let Some(pregnancy) = &record.pregnancy_status {
                println!("  pregnancy: {pregnancy}");
            }
            if let Some(health) = &record.health_status {
                println!("  health:    {health}");
            }
            Ok(())
        }
        None => bail!("no record with ear tag '{}'", args.ear_tag),
    }
}

fn print_record_line(record: &SowRecord) {
    let date = record
        .event_date
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| "--".to_string());
    let days = if record.days_since_event >= 0 {
        format!("{:>3} d", record.days_since_event)
    } else {
        "  ? d".to_string()
    };
    println!(
        "  {:<10} ventil {:<4} {:<10} {} {}",
        record.ear_tag,
        record.ventil_number,
        date,
        days,
        colored_light(record.traffic_light)
    );
}

fn colored_light(light: TrafficLight) -> ColoredString {
    match light {
        TrafficLight::Green => light.label().green(),
        TrafficLight::Yellow => light.label().yellow(),
        TrafficLight::Red => light.label().red(),
        TrafficLight::Purple => light.label().purple(),
        TrafficLight::Unknown => light.label().dimmed(),
    }
}
