//! Agents, their chains and deployment history

use crate::codec::JsonMap;
use crate::record;

use super::common::{Flavor, Metadata, Runtime, ServerlessConfig};

record! {
    /// Agent chain configuration
    pub struct AgentChain {
        optional description: String = "description",
        optional enabled: bool = "enabled",
        /// The name of the agent to chain to
        optional name: String = "name",
        optional prompt: String = "prompt",
    }
}

record! {
    /// Agent specification
    pub struct AgentSpec {
        optional configurations: JsonMap = "configurations",
        /// If false, the agent will not be active nor serve requests
        optional enabled: bool = "enabled",
        optional flavors: Vec<Flavor> = "flavors",
        optional integration_connections: Vec<String> = "integration_connections",
        /// Kubernetes PodTemplateSpec, passed through untouched
        optional pod_template: JsonMap = "pod_template",
        optional policies: Vec<String> = "policies",
        optional private_clusters: JsonMap = "private_clusters",
        optional runtime: Runtime = "runtime",
        optional sandbox: bool = "sandbox",
        optional serverless_config: ServerlessConfig = "serverless_config",
        optional agent_chain: Vec<AgentChain> = "agent_chain",
        optional description: String = "description",
        /// Names of the functions the agent can call
        optional functions: Vec<String> = "functions",
        optional knowledgebase: String = "knowledgebase",
        /// Name of the model the agent runs on
        optional model: String = "model",
        optional prompt: String = "prompt",
        optional repository: JsonMap = "repository",
        optional store_id: String = "store_id",
    }
}

record! {
    /// Agent
    pub struct Agent {
        optional metadata: Metadata = "metadata",
        optional spec: AgentSpec = "spec",
        optional status: String = "status",
    }
}

impl Agent {
    pub fn new(name: impl Into<String>, spec: AgentSpec) -> Self {
        Self {
            metadata: Metadata::named(name).into(),
            spec: spec.into(),
            ..Default::default()
        }
    }
}

record! {
    /// Store agent configuration, used to configure an agent from the Beamlit interface
    pub struct StoreAgentConfiguration {
        optional description: String = "description",
        /// Conditional rendering for the configuration, e.g. `provider === 'openai'`
        optional if_: String = "if",
        optional name: String = "name",
        optional required: bool = "required",
        optional secret: bool = "secret",
    }
}

record! {
    /// One step of an agent deployment
    pub struct AgentDeploymentHistoryEvent {
        optional end: String = "end",
        optional error: String = "error",
        optional name: String = "name",
        optional parameters: String = "parameters",
        optional start: String = "start",
        optional status: String = "status",
        optional sub_function: String = "sub_function",
        /// Duration in milliseconds
        optional took: i64 = "took",
        optional type_: String = "type",
    }
}

record! {
    /// History of an agent request
    pub struct AgentDeploymentHistory {
        optional agent: String = "agent",
        optional created_at: String = "created_at",
        optional end: String = "end",
        optional environment: String = "environment",
        optional events: Vec<AgentDeploymentHistoryEvent> = "events",
        optional request_id: String = "request_id",
        optional start: String = "start",
        optional status: String = "status",
        optional took: i64 = "took",
        optional workspace: String = "workspace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{Field, Record};
    use serde_json::json;

    #[test]
    fn test_store_agent_configuration_if_key() {
        let serde_json::Value::Object(map) = json!({"if": "provider === 'openai'", "name": "key"})
        else {
            unreachable!()
        };
        let config = StoreAgentConfiguration::decode(map.clone()).unwrap();
        assert_eq!(config.if_.as_deref(), Some("provider === 'openai'"));
        assert_eq!(config.encode(), map);
    }

    #[test]
    fn test_agent_new_encodes_only_set_fields() {
        let agent = Agent::new(
            "assistant",
            AgentSpec {
                model: Field::Present("gpt-4o".into()),
                ..Default::default()
            },
        );

        assert_eq!(
            serde_json::Value::Object(agent.encode()),
            json!({"metadata": {"name": "assistant"}, "spec": {"model": "gpt-4o"}})
        );
    }
}
