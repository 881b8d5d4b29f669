//! `bl` subcommands

pub mod apply;
pub mod delete;
pub mod get;
pub mod history;
pub mod login;
pub mod logout;
pub mod logs;
pub mod metrics;
pub mod run;
pub mod workspaces;

use anyhow::{bail, Context, Result};
use beamlit::codec::{JsonMap, Value};
use beamlit::models::{Agent, Function, Model, Resource};
use beamlit::{Client, Settings};
use clap::{Args, ValueEnum};
use serde::Deserialize;
use std::io::Read;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::output::OutputFormat;

/// Flags accepted by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Workspace to operate on (defaults to the current context)
    #[arg(short, long, global = true)]
    pub workspace: Option<String>,

    /// Environment to operate on (defaults to the current context)
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Resource families addressable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    #[value(alias = "agent")]
    Agents,
    #[value(alias = "function")]
    Functions,
    #[value(alias = "model")]
    Models,
}

impl ResourceKind {
    /// Map a manifest `kind` to its resource family
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            k if k == Agent::KIND => Some(ResourceKind::Agents),
            k if k == Function::KIND => Some(ResourceKind::Functions),
            k if k == Model::KIND => Some(ResourceKind::Models),
            _ => None,
        }
    }

    /// Singular segment used by the run URL
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Agents => Agent::SINGULAR,
            ResourceKind::Functions => Function::SINGULAR,
            ResourceKind::Models => Model::SINGULAR,
        }
    }
}

/// Call a generic `fn name<R: Resource>(..)` for the type behind a [`ResourceKind`]
macro_rules! for_kind {
    ($kind:expr, $func:ident($($arg:expr),* $(,)?)) => {
        match $kind {
            $crate::commands::ResourceKind::Agents => {
                $func::<beamlit::models::Agent>($($arg),*).await
            }
            $crate::commands::ResourceKind::Functions => {
                $func::<beamlit::models::Function>($($arg),*).await
            }
            $crate::commands::ResourceKind::Models => {
                $func::<beamlit::models::Model>($($arg),*).await
            }
        }
    };
}
pub(crate) use for_kind;

/// Authenticated client plus the resolved context
pub struct Session {
    pub client: Client,
    pub environment: String,
    pub output: OutputFormat,
}

impl Session {
    /// Resolve workspace, environment and credentials: flags first, then
    /// `BL_*` variables and `beamlit.toml`, then the saved context
    pub fn connect(globals: &GlobalArgs) -> Result<Self> {
        let config = Config::load()?;
        let settings = Settings::load()?;

        let workspace = globals
            .workspace
            .clone()
            .or_else(|| settings.workspace.clone())
            .or_else(|| config.context.workspace.clone())
            .context("No workspace selected. Run `bl login <workspace>` first.")?;
        let environment = globals
            .env
            .clone()
            .or_else(|| config.context.environment.clone())
            .unwrap_or_else(|| settings.environment.clone());
        let credentials = settings
            .credentials()
            .or_else(|| {
                config
                    .workspace(&workspace)
                    .and_then(|w| w.credentials.to_credentials())
            })
            .with_context(|| {
                format!(
                    "Not logged in to workspace {}. Run `bl login {}` first.",
                    workspace, workspace
                )
            })?;

        debug!(
            workspace = %workspace,
            environment = %environment,
            base_url = %settings.base_url,
            "Connecting"
        );
        let client = Client::builder(&settings.base_url)
            .run_url(&settings.run_url)
            .environment(&environment)
            .workspace(&workspace)
            .credentials(credentials)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            environment,
            output: globals.output,
        })
    }

    pub fn env(&self) -> Option<&str> {
        Some(self.environment.as_str())
    }
}

/// One document of a manifest file
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub kind: String,
    /// `metadata` and `spec` of the document, as the resource body
    pub body: JsonMap,
}

impl Manifest {
    pub fn name(&self) -> Option<&str> {
        self.body.get("metadata")?.get("name")?.as_str()
    }

    /// Decode the body into the resource type named by `kind`
    pub fn decode<R: Resource>(&self) -> Result<R> {
        Ok(R::decode(self.body.clone())?)
    }
}

/// Read manifests from a file, or stdin when `path` is `-`
pub fn read_manifests(path: &str) -> Result<Vec<Manifest>> {
    let content = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read manifests from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
    };
    parse_manifests(&content).with_context(|| format!("Invalid manifest in {}", path))
}

/// Parse a multi-document YAML (or JSON) stream of resource manifests
pub fn parse_manifests(content: &str) -> Result<Vec<Manifest>> {
    let mut manifests = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let value = Value::deserialize(document)?;
        let mut map = match value {
            Value::Null => continue,
            Value::Object(map) => map,
            other => bail!("Expected a mapping, found {}", other),
        };
        let kind = match map.remove("kind") {
            Some(Value::String(kind)) => kind,
            _ => bail!("Manifest is missing `kind`"),
        };

        let mut body = JsonMap::new();
        for key in ["metadata", "spec"] {
            if let Some(value) = map.remove(key) {
                body.insert(key.to_string(), value);
            }
        }
        manifests.push(Manifest { kind, body });
    }
    Ok(manifests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_multi_document_manifest() {
        let manifests = parse_manifests(
            r#"
apiVersion: beamlit.com/v1alpha1
kind: Agent
metadata:
  name: support
spec:
  model: gpt-4o
---
apiVersion: beamlit.com/v1alpha1
kind: Function
metadata:
  name: search
"#,
        )
        .unwrap();

        assert_eq!(manifests.len(), 2);
        assert_eq!(manifests[0].kind, "Agent");
        assert_eq!(manifests[0].name(), Some("support"));
        assert_eq!(
            Value::Object(manifests[0].body.clone()),
            json!({"metadata": {"name": "support"}, "spec": {"model": "gpt-4o"}})
        );
        assert_eq!(ResourceKind::from_kind(&manifests[1].kind), Some(ResourceKind::Functions));

        let agent: Agent = manifests[0].decode().unwrap();
        assert_eq!(agent.name(), Some("support"));
    }

    #[test]
    fn test_manifest_requires_kind() {
        assert!(parse_manifests("metadata:\n  name: x\n").is_err());
        assert!(parse_manifests("- 1\n- 2\n").is_err());
    }
}
