//! Tools backed by remote functions
//!
//! A [`RemoteToolkit`] fetches a function definition once and exposes it as
//! one [`Tool`] per callable: the function itself, or each entry of its kit.

mod run;
mod schema;

pub use run::RunClient;
pub use schema::{create_dynamic_schema, validate_args, ParameterType};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::{info, warn};

use crate::api::functions::get_function;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::models::Function;

/// A callable exposed to an agent
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments
    fn args_schema(&self) -> &Value;

    /// Run the tool with JSON arguments and return its textual result
    async fn invoke(&self, args: Value) -> Result<String>;
}

/// A tool that calls a deployed function through the run URL
#[derive(Debug, Clone)]
pub struct RemoteTool {
    client: RunClient,
    name: String,
    resource_name: String,
    environment: String,
    description: String,
    args_schema: Value,
    /// Kit entries add their own name to the body
    kit: bool,
}

impl RemoteTool {
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn is_kit(&self) -> bool {
        self.kit
    }
}

#[async_trait]
impl Tool for RemoteTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn args_schema(&self) -> &Value {
        &self.args_schema
    }

    async fn invoke(&self, args: Value) -> Result<String> {
        let mut body = validate_args(&self.args_schema, args)?;
        if self.kit {
            body.insert("name".to_string(), Value::String(self.name.clone()));
        }
        self.client
            .run(
                "function",
                &self.resource_name,
                &self.environment,
                Method::POST,
                Some(&Value::Object(body)),
            )
            .await
    }
}

/// Lazily-initialised set of tools for one remote function
#[derive(Debug, Clone)]
pub struct RemoteToolkit {
    client: Client,
    function: String,
    cached: Option<Function>,
}

impl RemoteToolkit {
    pub fn new(client: Client, function: impl Into<String>) -> Self {
        Self {
            client,
            function: function.into(),
            cached: None,
        }
    }

    /// Fetch the function definition. Only the first call hits the API.
    pub async fn initialize(&mut self) -> Result<()> {
        if self.cached.is_some() {
            return Ok(());
        }
        let response = get_function(&self.client, &self.function, None).await?;
        let function = response.parsed.ok_or_else(|| {
            Error::tool(format!(
                "Function {} could not be fetched (status {})",
                self.function, response.status
            ))
        })?;
        info!(function = %self.function, "Remote toolkit initialized");
        self.cached = Some(function);
        Ok(())
    }

    pub fn function(&self) -> Option<&Function> {
        self.cached.as_ref()
    }

    /// Build the tools; fails if [`initialize`](Self::initialize) has not succeeded
    pub fn tools(&self) -> Result<Vec<RemoteTool>> {
        let function = self
            .cached
            .as_ref()
            .ok_or_else(|| Error::tool("Must initialize the toolkit first"))?;
        let resource_name = function
            .metadata
            .value()
            .and_then(|m| m.name.value())
            .cloned()
            .unwrap_or_else(|| self.function.clone());
        let run = RunClient::new(self.client.clone());
        let environment = self.client.environment().to_string();

        let Some(spec) = function.spec.value() else {
            return Ok(vec![RemoteTool {
                client: run,
                args_schema: create_dynamic_schema(&resource_name, &[]),
                name: resource_name.clone(),
                resource_name,
                environment,
                description: String::new(),
                kit: false,
            }]);
        };

        if let Some(kit) = spec.kit.value().filter(|kit| !kit.is_empty()) {
            return Ok(kit
                .iter()
                .enumerate()
                .filter_map(|(index, entry)| {
                    let Some(name) = entry.name.value().cloned() else {
                        warn!(
                            function = %resource_name,
                            index,
                            "Skipping kit entry without a name"
                        );
                        return None;
                    };
                    let parameters = entry.parameters.value().map(Vec::as_slice).unwrap_or(&[]);
                    Some(RemoteTool {
                        client: run.clone(),
                        args_schema: create_dynamic_schema(&name, parameters),
                        name,
                        resource_name: resource_name.clone(),
                        environment: environment.clone(),
                        description: entry.description.value().cloned().unwrap_or_default(),
                        kit: true,
                    })
                })
                .collect());
        }

        let parameters = spec.parameters.value().map(Vec::as_slice).unwrap_or(&[]);
        Ok(vec![RemoteTool {
            client: run,
            args_schema: create_dynamic_schema(&resource_name, parameters),
            name: resource_name.clone(),
            resource_name,
            environment,
            description: spec.description.value().cloned().unwrap_or_default(),
            kit: false,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tools_require_initialize() {
        let client = Client::builder("http://api").build().unwrap();
        let toolkit = RemoteToolkit::new(client, "search");
        let err = toolkit.tools().unwrap_err();
        assert!(err.to_string().contains("Must initialize"));
    }

    #[test]
    fn test_unnamed_kit_entries_are_skipped() {
        use crate::codec::Field;
        use crate::models::{FunctionKit, FunctionSpec};

        let client = Client::builder("http://api").workspace("acme").build().unwrap();
        let mut toolkit = RemoteToolkit::new(client, "github");
        let named = FunctionKit {
            name: Field::Present("close_issue".into()),
            ..Default::default()
        };
        let spec = FunctionSpec {
            kit: Field::Present(vec![FunctionKit::default(), named]),
            ..Default::default()
        };
        toolkit.cached = Some(Function::new("github", spec));

        let tools = toolkit.tools().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name(), "close_issue");
    }
}
