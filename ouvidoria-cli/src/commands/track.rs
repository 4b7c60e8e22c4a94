//! Track command implementation.

use std::path::PathBuf;

use anyhow::{bail, Result};
use colored::Colorize;

use ouvidoria_core::{timeline, MilestoneState, Payload, TrackingResolver};

/// Execute the track command.
pub async fn execute(data_dir: PathBuf, protocol: String) -> Result<()> {
    let store = super::open_store(&data_dir)?;
    let resolver = TrackingResolver::new(store);

    let Some(record) = resolver.find_by_protocol(&protocol) else {
        bail!("No manifestation found for protocol: {protocol}");
    };

    println!();
    println!("{} {}", "Protocol:".bold(), record.protocol);
    println!("{} {}", "Type:".bold(), record.payload.type_name());
    match &record.payload {
        Payload::Text { content } => println!("{} {}", "Content:".bold(), content),
        Payload::Media { media_description } => {
            println!("{} {}", "Description:".bold(), media_description)
        }
        Payload::Audio => {}
    }
    if record.is_anonymous {
        println!("{} anonymous", "Submitted:".bold());
    } else {
        let who = record.name.as_deref().unwrap_or("-");
        let mail = record.email.as_deref().unwrap_or("-");
        println!("{} {} <{}>", "Submitted:".bold(), who, mail);
    }
    println!(
        "{} {}",
        "Created:".bold(),
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "{} {} (since {})",
        "Status:".bold(),
        record.status.label().cyan().bold(),
        record.status_updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    println!();
    println!("{}", "Timeline:".bold());
    for milestone in timeline(record.status) {
        let marker = match milestone.state {
            MilestoneState::Completed => "[x]".green(),
            MilestoneState::Current => "[>]".cyan().bold(),
            MilestoneState::Pending => "[ ]".dimmed(),
        };
        let label = match milestone.state {
            MilestoneState::Current => milestone.status.label().bold(),
            _ => milestone.status.label().normal(),
        };
        println!("   {} {}", marker, label);
    }

    Ok(())
}
