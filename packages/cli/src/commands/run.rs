use anyhow::{Context, Result};
use beamlit::codec::Value;
use beamlit::toolkit::RunClient;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Method;

use super::{GlobalArgs, ResourceKind, Session};

/// Invoke a deployed resource through the run URL and print its answer
pub async fn run(
    globals: &GlobalArgs,
    kind: ResourceKind,
    name: &str,
    data: Option<String>,
) -> Result<()> {
    let body = data
        .as_deref()
        .map(serde_json::from_str::<Value>)
        .transpose()
        .context("--data must be valid JSON")?;
    let session = Session::connect(globals)?;
    let runner = RunClient::new(session.client.clone());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.blue} {msg}")?);
    spinner.set_message(format!("Running {} {}", kind.singular(), name));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = runner
        .run(
            kind.singular(),
            name,
            &session.environment,
            Method::POST,
            body.as_ref(),
        )
        .await;
    spinner.finish_and_clear();

    let output = result.with_context(|| format!("Failed to run {} {}", kind.singular(), name))?;
    match serde_json::from_str::<Value>(&output) {
        Ok(json) if !session.output.is_table() => session.output.print_value(&json)?,
        _ => println!("{}", output),
    }
    eprintln!("{} {} {}", "✓".green().bold(), kind.singular(), name.cyan());
    Ok(())
}
