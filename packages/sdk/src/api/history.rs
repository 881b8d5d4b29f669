//! Deployment history endpoints

use crate::api::ok_records;
use crate::client::{Client, Request, Response};
use crate::error::Result;
use crate::models::AgentDeploymentHistory;

/// History of every agent touched by one request
pub async fn get_agents_history(
    client: &Client,
    request_id: &str,
) -> Result<Response<Vec<AgentDeploymentHistory>>> {
    let request = Request::get(["history", "agents", request_id]);
    client.execute(request, ok_records::<AgentDeploymentHistory>).await
}
