//! List command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use ouvidoria_core::{derive_status, Manifestation};

/// Execute the list command.
pub async fn execute(data_dir: PathBuf, json: bool) -> Result<()> {
    let store = super::open_store(&data_dir)?;

    // Both output modes report the time-derived status, not the stored one
    let now = chrono::Utc::now();
    let records: Vec<Manifestation> = store
        .list_all()
        .into_iter()
        .map(|record| {
            let (status, status_updated_at) = derive_status(record.created_at, now);
            Manifestation {
                status,
                status_updated_at,
                ..record
            }
        })
        .collect();

    if json {
        let out =
            serde_json::to_string_pretty(&records).context("Failed to serialize manifestations")?;
        println!("{out}");
        return Ok(());
    }

    if records.is_empty() {
        println!("{}", "No manifestations stored.".dimmed());
        return Ok(());
    }

    println!();
    println!(
        "{:<20} {:<7} {:<13} {}",
        "PROTOCOL".bold(),
        "TYPE".bold(),
        "STATUS".bold(),
        "CREATED".bold()
    );
    for record in &records {
        println!(
            "{:<20} {:<7} {:<13} {}",
            record.protocol,
            record.payload.type_name(),
            record.status.label(),
            record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    println!();
    println!("   {} manifestation(s)", records.len());

    Ok(())
}
