use anyhow::{Context, Result};
use beamlit::api::history;
use beamlit::codec::encode_list;
use colored::Colorize;

use super::{GlobalArgs, Session};
use crate::output::{format_date, print_table_header, print_table_row};

/// Show what every agent did while serving one request
pub async fn run(globals: &GlobalArgs, request_id: &str) -> Result<()> {
    let session = Session::connect(globals)?;
    let histories = history::get_agents_history(&session.client, request_id)
        .await
        .with_context(|| format!("Failed to fetch history of request {}", request_id))?
        .parsed
        .unwrap_or_default();

    if !session.output.is_table() {
        return session.output.print_value(&encode_list(&histories));
    }

    if histories.is_empty() {
        println!("{}", "No history found.".dimmed());
        return Ok(());
    }

    for entry in &histories {
        let took = |ms: Option<&i64>| ms.map(|t| format!("{}ms", t)).unwrap_or_else(|| "-".into());
        println!(
            "{} {}  {}  {}  {}",
            "Agent".bold(),
            entry.agent.as_deref().unwrap_or("-").cyan(),
            entry.status.as_deref().unwrap_or("-"),
            entry.start.as_deref().map(format_date).unwrap_or_default().dimmed(),
            took(entry.took.value()),
        );

        let events = entry.events.value().map(Vec::as_slice).unwrap_or(&[]);
        if events.is_empty() {
            continue;
        }
        print_table_header(&[("NAME", 24), ("TYPE", 12), ("STATUS", 10), ("TOOK", 10)]);
        for event in events {
            let duration = took(event.took.value());
            print_table_row(&[
                (event.name.as_deref().unwrap_or("-"), 24),
                (event.type_.as_deref().unwrap_or("-"), 12),
                (event.status.as_deref().unwrap_or("-"), 10),
                (duration.as_str(), 10),
            ]);
        }
        println!();
    }
    Ok(())
}
