use anyhow::{bail, Context, Result};
use beamlit::api::workspaces;
use beamlit::{Client, Credentials, Settings};
use colored::Colorize;
use dialoguer::Password;

use super::GlobalArgs;
use crate::config::{Config, StoredCredentials};

const DEFAULT_ENVIRONMENT: &str = "production";

/// Handle the login command
pub async fn run(globals: &GlobalArgs, workspace: &str, environment: Option<String>) -> Result<()> {
    println!("{}", "Beamlit Login".bold());
    println!();

    let mut config = Config::load()?;
    let settings = Settings::load()?;

    let api_key = match std::env::var("BL_API_KEY").ok().filter(|k| !k.is_empty()) {
        Some(key) => key,
        None => Password::new().with_prompt("API Key").interact()?,
    };
    if api_key.is_empty() {
        bail!("API key cannot be empty");
    }

    // Verify the key against the workspace
    let client = Client::builder(&settings.base_url)
        .workspace(workspace)
        .credentials(Credentials::ApiKey(api_key.clone()))
        .build()?;
    workspaces::get_workspace(&client, workspace)
        .await
        .with_context(|| format!("Invalid API key or cannot reach workspace {}", workspace))?;

    let environment = environment
        .or_else(|| globals.env.clone())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
    config.set_credentials(workspace, StoredCredentials::api_key(api_key));
    config.set_context(workspace, &environment);
    config.save()?;

    println!(
        "{} Logged in to workspace {} ({})",
        "✓".green().bold(),
        workspace.cyan(),
        environment
    );
    println!(
        "  Config saved to {}",
        Config::path()?.display().to_string().dimmed()
    );

    Ok(())
}
