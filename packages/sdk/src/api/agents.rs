//! Agent endpoints

use crate::api::resource;
use crate::client::{Client, Response};
use crate::error::Result;
use crate::models::{Agent, ResourceDeploymentLog, ResourceMetrics};

/// List all agents
pub async fn list_agents(client: &Client, environment: Option<&str>) -> Result<Response<Vec<Agent>>> {
    resource::list(client, environment).await
}

/// Get an agent by name
pub async fn get_agent(
    client: &Client,
    agent_name: &str,
    environment: Option<&str>,
) -> Result<Response<Agent>> {
    resource::get(client, agent_name, environment).await
}

pub async fn create_agent(client: &Client, body: &Agent) -> Result<Response<Agent>> {
    resource::create(client, body).await
}

pub async fn update_agent(client: &Client, agent_name: &str, body: &Agent) -> Result<Response<Agent>> {
    resource::update(client, agent_name, body).await
}

/// Delete an agent, returning it as it was
pub async fn delete_agent(
    client: &Client,
    agent_name: &str,
    environment: Option<&str>,
) -> Result<Response<Agent>> {
    resource::delete::<Agent>(client, agent_name, environment).await
}

pub async fn get_agent_metrics(
    client: &Client,
    agent_name: &str,
    environment: Option<&str>,
) -> Result<Response<ResourceMetrics>> {
    resource::metrics::<Agent>(client, agent_name, environment).await
}

/// Logs of an agent deployment in one environment
pub async fn get_agent_deployment_logs(
    client: &Client,
    agent_name: &str,
    environment_name: &str,
) -> Result<Response<Vec<ResourceDeploymentLog>>> {
    resource::deployment_logs::<Agent>(client, agent_name, environment_name).await
}
