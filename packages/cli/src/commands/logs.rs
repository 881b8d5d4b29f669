use anyhow::{Context, Result};
use beamlit::api::agents;
use beamlit::codec::encode_list;
use colored::Colorize;

use super::{GlobalArgs, Session};
use crate::output::format_date;

/// Print the deployment logs of an agent
pub async fn run(globals: &GlobalArgs, agent: &str, environment: Option<String>) -> Result<()> {
    let session = Session::connect(globals)?;
    let environment = environment.unwrap_or_else(|| session.environment.clone());

    let logs = agents::get_agent_deployment_logs(&session.client, agent, &environment)
        .await
        .with_context(|| format!("Failed to fetch logs of agent {}", agent))?
        .parsed
        .unwrap_or_default();

    if !session.output.is_table() {
        return session.output.print_value(&encode_list(&logs));
    }

    if logs.is_empty() {
        println!("{}", "No logs found.".dimmed());
        return Ok(());
    }
    for log in &logs {
        let timestamp = log.timestamp.as_deref().map(format_date).unwrap_or_default();
        println!(
            "{} {}",
            timestamp.dimmed(),
            log.message.as_deref().unwrap_or_default()
        );
    }
    Ok(())
}
