use anyhow::{Context, Result};
use beamlit::api::resource;
use beamlit::models::Resource;

use super::{for_kind, GlobalArgs, ResourceKind, Session};

/// List resources of a kind, or show one by name
pub async fn run(globals: &GlobalArgs, kind: ResourceKind, name: Option<String>) -> Result<()> {
    let session = Session::connect(globals)?;
    for_kind!(kind, fetch(&session, name.as_deref()))
}

async fn fetch<R: Resource>(session: &Session, name: Option<&str>) -> Result<()> {
    if let Some(name) = name {
        let found: R = resource::get::<R>(&session.client, name, session.env())
            .await
            .with_context(|| format!("Failed to get {} {}", R::SINGULAR, name))?
            .parsed
            .with_context(|| format!("{} {} not found", R::KIND, name))?;
        return session.output.print_resource(&found);
    }

    let resources: Vec<R> = resource::list::<R>(&session.client, session.env())
        .await
        .with_context(|| format!("Failed to list {}", R::PLURAL))?
        .parsed
        .unwrap_or_default();
    session.output.print_resources(&resources)
}
