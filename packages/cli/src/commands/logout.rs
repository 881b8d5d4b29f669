use anyhow::{bail, Result};
use colored::Colorize;

use crate::config::Config;

/// Forget the credentials of a workspace
pub async fn run(workspace: &str) -> Result<()> {
    let mut config = Config::load()?;
    if !config.remove_workspace(workspace) {
        bail!("Not logged in to workspace {}", workspace);
    }
    config.save()?;

    println!("{} Logged out of {}", "✓".green().bold(), workspace.cyan());
    Ok(())
}
