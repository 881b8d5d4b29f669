use anyhow::{bail, Result};
use beamlit::api::resource;
use beamlit::models::Resource;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use super::{for_kind, read_manifests, GlobalArgs, Manifest, ResourceKind, Session};

/// Create or update every resource of a manifest file
pub async fn run(globals: &GlobalArgs, file: &str) -> Result<()> {
    let manifests = read_manifests(file)?;
    if manifests.is_empty() {
        println!("{}", "Nothing to apply.".dimmed());
        return Ok(());
    }
    let session = Session::connect(globals)?;

    let mut failed = 0;
    for manifest in &manifests {
        let label = format!("{} {}", manifest.kind, manifest.name().unwrap_or("<unnamed>"));

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner:.blue} {msg}")?,
        );
        spinner.set_message(format!("Applying {}", label));

        let result = match ResourceKind::from_kind(&manifest.kind) {
            Some(kind) => for_kind!(kind, apply_one(&session, manifest)),
            None => Err(anyhow::anyhow!("unknown kind {}", manifest.kind)),
        };

        match result {
            Ok(action) => {
                spinner.finish_with_message(format!("{} {} {}", "✓".green().bold(), label, action));
            }
            Err(e) => {
                failed += 1;
                spinner.finish_with_message(format!(
                    "{} {} {}: {:#}",
                    "✗".red().bold(),
                    label,
                    "failed".red(),
                    e
                ));
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} resource(s) failed", failed, manifests.len());
    }
    Ok(())
}

async fn apply_one<R: Resource>(session: &Session, manifest: &Manifest) -> Result<&'static str> {
    let body: R = manifest.decode()?;
    let applied = resource::apply(&session.client, &body).await?;
    Ok(applied.action())
}
