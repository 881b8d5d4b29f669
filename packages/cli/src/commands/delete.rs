use anyhow::{bail, Context, Result};
use beamlit::api::resource;
use beamlit::models::Resource;
use colored::Colorize;

use super::{for_kind, read_manifests, GlobalArgs, ResourceKind, Session};

/// Delete one resource by name, or every resource of a manifest file
pub async fn run(
    globals: &GlobalArgs,
    kind: Option<ResourceKind>,
    name: Option<String>,
    file: Option<String>,
) -> Result<()> {
    let session = Session::connect(globals)?;

    if let Some(file) = file {
        let mut failed = 0;
        for manifest in read_manifests(&file)? {
            let Some(kind) = ResourceKind::from_kind(&manifest.kind) else {
                eprintln!("{} Unknown kind {}", "✗".red().bold(), manifest.kind);
                failed += 1;
                continue;
            };
            let Some(name) = manifest.name() else {
                eprintln!("{} {} without metadata.name", "✗".red().bold(), manifest.kind);
                failed += 1;
                continue;
            };
            if let Err(e) = for_kind!(kind, remove(&session, name)) {
                eprintln!("{} {:#}", "✗".red().bold(), e);
                failed += 1;
            }
        }
        if failed > 0 {
            bail!("{} resource(s) could not be deleted", failed);
        }
        return Ok(());
    }

    match (kind, name) {
        (Some(kind), Some(name)) => for_kind!(kind, remove(&session, &name)),
        _ => bail!("Specify a kind and a name, or a manifest file with -f"),
    }
}

async fn remove<R: Resource>(session: &Session, name: &str) -> Result<()> {
    resource::delete::<R>(&session.client, name, session.env())
        .await
        .with_context(|| format!("Failed to delete {} {}", R::SINGULAR, name))?;
    println!(
        "{} {} {} deleted",
        "✓".green().bold(),
        R::KIND,
        name.cyan()
    );
    Ok(())
}
