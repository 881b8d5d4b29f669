//! Output formatting for CLI

use anyhow::Result;
use beamlit::codec::{JsonMap, Value};
use beamlit::models::Resource;
use chrono::DateTime;
use clap::ValueEnum;
use colored::Colorize;

pub const API_VERSION: &str = "beamlit.com/v1alpha1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
    /// YAML with highlighted keys
    Pretty,
}

impl OutputFormat {
    pub fn is_table(&self) -> bool {
        matches!(self, OutputFormat::Table)
    }

    /// Print an arbitrary JSON value in a structured format. Table output is
    /// handled by each command.
    pub fn print_value(&self, value: &Value) -> Result<()> {
        match self {
            OutputFormat::Json | OutputFormat::Table => {
                println!("{}", serde_json::to_string_pretty(value)?);
            }
            OutputFormat::Yaml => {
                print!("{}", serde_yaml::to_string(value)?);
            }
            OutputFormat::Pretty => {
                print!("{}", highlight_yaml(&serde_yaml::to_string(value)?));
            }
        }
        Ok(())
    }

    /// Print a single resource; JSON output is one object
    pub fn print_resource<R: Resource>(&self, resource: &R) -> Result<()> {
        match self {
            OutputFormat::Table => {
                print_resource_table(std::slice::from_ref(resource));
                Ok(())
            }
            _ => self.print_value(&to_document(resource)),
        }
    }

    /// Print a listing as a table or as manifest documents; JSON output is
    /// always an array, whatever the count
    pub fn print_resources<R: Resource>(&self, resources: &[R]) -> Result<()> {
        match self {
            OutputFormat::Table => {
                print_resource_table(resources);
                Ok(())
            }
            OutputFormat::Json => self.print_value(&to_documents(resources)),
            OutputFormat::Yaml | OutputFormat::Pretty => {
                for (i, resource) in resources.iter().enumerate() {
                    if i > 0 {
                        println!("---");
                    }
                    self.print_value(&to_document(resource))?;
                }
                Ok(())
            }
        }
    }
}

/// `{apiVersion, kind, metadata, spec}` manifest of a resource
pub fn to_document<R: Resource>(resource: &R) -> Value {
    let mut wire = resource.encode();
    let mut doc = JsonMap::new();
    doc.insert("apiVersion".into(), Value::String(API_VERSION.into()));
    doc.insert("kind".into(), Value::String(R::KIND.into()));
    doc.insert("metadata".into(), wire.remove("metadata").unwrap_or(Value::Null));
    doc.insert("spec".into(), wire.remove("spec").unwrap_or(Value::Null));
    Value::Object(doc)
}

/// Array of manifest documents
pub fn to_documents<R: Resource>(resources: &[R]) -> Value {
    Value::Array(resources.iter().map(to_document).collect())
}

/// Reformat an RFC 3339 timestamp as `YYYY-MM-DD HH:MM:SS`; other strings pass through
pub fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn print_resource_table<R: Resource>(resources: &[R]) {
    if resources.is_empty() {
        println!("{}", format!("No {} found.", R::PLURAL).dimmed());
        return;
    }

    print_table_header(&[
        ("WORKSPACE", 16),
        ("NAME", 30),
        ("CREATED_AT", 20),
        ("UPDATED_AT", 20),
    ]);
    for resource in resources {
        let metadata = resource.metadata();
        let text = |value: Option<&str>| value.unwrap_or("-").to_string();
        let date = |value: Option<&str>| value.map(format_date).unwrap_or_else(|| "-".into());

        let workspace = text(metadata.and_then(|m| m.workspace.as_deref()));
        let name = text(metadata.and_then(|m| m.name.as_deref()));
        let created = date(metadata.and_then(|m| m.created_at.as_deref()));
        let updated = date(metadata.and_then(|m| m.updated_at.as_deref()));

        print_table_row(&[
            (workspace.as_str(), 16),
            (name.as_str(), 30),
            (created.as_str(), 20),
            (updated.as_str(), 20),
        ]);
    }
}

/// Print a table header
pub fn print_table_header(columns: &[(&str, usize)]) {
    let header: String = columns
        .iter()
        .map(|(name, width)| format!("{:<width$}", name, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header.dimmed());
}

/// Print a table row, truncating cells wider than their column
pub fn print_table_row(values: &[(&str, usize)]) {
    let row: String = values
        .iter()
        .map(|(val, width)| {
            let s = if val.chars().count() > *width {
                let cut: String = val.chars().take(width.saturating_sub(3)).collect();
                format!("{}...", cut)
            } else {
                val.to_string()
            };
            format!("{:<width$}", s, width = width)
        })
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", row);
}

/// Color the key of every `key: value` line
fn highlight_yaml(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len());
    for line in yaml.lines() {
        let indent = line.len() - line.trim_start_matches([' ', '-']).len();
        let (prefix, rest) = line.split_at(indent);
        match rest.find(':') {
            Some(pos) if !rest.starts_with(['"', '\'']) => {
                let (key, value) = rest.split_at(pos);
                out.push_str(&format!("{}{}{}\n", prefix, key.cyan(), value));
            }
            _ => {
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use beamlit::models::{Agent, AgentSpec};
    use beamlit::Field;
    use serde_json::json;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-05T10:20:30Z"), "2024-03-05 10:20:30");
        assert_eq!(format_date("2024-03-05T10:20:30.123+00:00"), "2024-03-05 10:20:30");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_resource_document() {
        let agent = Agent::new(
            "support",
            AgentSpec {
                enabled: Field::Present(true),
                ..Default::default()
            },
        );
        assert_eq!(
            to_document(&agent),
            json!({
                "apiVersion": "beamlit.com/v1alpha1",
                "kind": "Agent",
                "metadata": {"name": "support"},
                "spec": {"enabled": true}
            })
        );
    }

    #[test]
    fn test_listing_is_an_array_for_any_count() {
        let one = vec![Agent::new("a", AgentSpec::default())];
        let docs = to_documents(&one);
        assert_eq!(docs.as_array().map(Vec::len), Some(1));
        assert_eq!(docs[0]["metadata"]["name"], "a");

        assert_eq!(to_documents::<Agent>(&[]), json!([]));
    }

    #[test]
    fn test_highlight_keeps_values() {
        colored::control::set_override(false);
        let yaml = "kind: Agent\nmetadata:\n  name: a\n";
        assert_eq!(highlight_yaml(yaml), yaml);
    }
}
