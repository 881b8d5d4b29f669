use anyhow::{bail, Result};
use colored::Colorize;

use super::GlobalArgs;
use crate::config::Config;
use crate::output::{print_table_header, print_table_row};

/// List the workspaces logged into, or switch the current context
pub async fn run(
    globals: &GlobalArgs,
    workspace: Option<String>,
    environment: Option<String>,
) -> Result<()> {
    let mut config = Config::load()?;

    let Some(workspace) = workspace else {
        if config.workspaces.is_empty() {
            println!("{}", "No workspaces. Run `bl login <workspace>` first.".dimmed());
            return Ok(());
        }
        let current = config.context.workspace.as_deref();
        print_table_header(&[("CURRENT", 8), ("NAME", 30)]);
        for ws in &config.workspaces {
            let marker = if current == Some(ws.name.as_str()) { "*" } else { "" };
            print_table_row(&[(marker, 8), (ws.name.as_str(), 30)]);
        }
        return Ok(());
    };

    if config.workspace(&workspace).is_none() {
        bail!("Not logged in to workspace {}. Run `bl login {}` first.", workspace, workspace);
    }
    let environment = environment
        .or_else(|| globals.env.clone())
        .or_else(|| config.context.environment.clone())
        .unwrap_or_else(|| "production".to_string());
    config.set_context(&workspace, &environment);
    config.save()?;

    println!(
        "{} Switched to workspace {} ({})",
        "✓".green().bold(),
        workspace.cyan(),
        environment
    );
    Ok(())
}
