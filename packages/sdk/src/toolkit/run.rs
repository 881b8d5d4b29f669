//! Calls to deployed resources through the run URL

use reqwest::{Method, Url};
use serde_json::Value;
use tracing::debug;

use crate::client::{join_url, Client};
use crate::error::{Error, Result};

/// Invokes agents, functions and models deployed in a workspace
#[derive(Debug, Clone)]
pub struct RunClient {
    client: Client,
}

impl RunClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// `{run_url}/{workspace}/{kind}s/{name}?environment={environment}`
    pub fn url(&self, kind: &str, name: &str) -> Result<Url> {
        let workspace = self
            .client
            .workspace()
            .ok_or_else(|| Error::config("A workspace is required to run resources"))?;
        let collection = format!("{}s", kind);
        join_url(self.client.run_url(), [workspace, collection.as_str(), name])
    }

    /// Send `body` to a deployed resource and return the response text
    pub async fn run(
        &self,
        kind: &str,
        name: &str,
        environment: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<String> {
        let url = self.url(kind, name)?;
        debug!(kind, name, environment, url = %url, "Running resource");

        let mut request = self
            .client
            .http()
            .request(method, url)
            .query(&[("environment", environment)]);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::UnexpectedStatus { status, body: text });
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_url() {
        let client = Client::builder("http://api")
            .run_url("http://run/")
            .workspace("acme")
            .build()
            .unwrap();
        let run = RunClient::new(client);
        assert_eq!(
            run.url("function", "search").unwrap().as_str(),
            "http://run/acme/functions/search"
        );
        assert_eq!(
            run.url("agent", "../admin?x=1").unwrap().as_str(),
            "http://run/acme/agents/..%2Fadmin%3Fx=1"
        );
    }

    #[test]
    fn test_run_url_requires_workspace() {
        let client = Client::builder("http://api").build().unwrap();
        assert!(RunClient::new(client).url("agent", "a").is_err());
    }
}
