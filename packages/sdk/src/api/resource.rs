//! CRUD shared by agents, functions and models

use reqwest::StatusCode;
use tracing::debug;

use crate::api::{ok_record, ok_records};
use crate::client::{Client, Outcome, Request, Response};
use crate::error::{Error, Result};
use crate::models::{Resource, ResourceDeploymentLog, ResourceMetrics};

fn collection<R: Resource>() -> Vec<String> {
    vec![R::PLURAL.to_string()]
}

fn item<R: Resource>(name: &str) -> Vec<String> {
    vec![R::PLURAL.to_string(), name.to_string()]
}

/// `GET /{plural}`
pub async fn list<R: Resource>(
    client: &Client,
    environment: Option<&str>,
) -> Result<Response<Vec<R>>> {
    let request = Request::get(collection::<R>()).query("environment", environment);
    client.execute(request, ok_records::<R>).await
}

/// `GET /{plural}/{name}`
pub async fn get<R: Resource>(
    client: &Client,
    name: &str,
    environment: Option<&str>,
) -> Result<Response<R>> {
    let request = Request::get(item::<R>(name)).query("environment", environment);
    client.execute(request, ok_record::<R>).await
}

/// `POST /{plural}`
pub async fn create<R: Resource>(client: &Client, body: &R) -> Result<Response<R>> {
    let request = Request::post(collection::<R>()).json(body.encode());
    client.execute(request, ok_record::<R>).await
}

/// `PUT /{plural}/{name}`
pub async fn update<R: Resource>(client: &Client, name: &str, body: &R) -> Result<Response<R>> {
    let request = Request::put(item::<R>(name)).json(body.encode());
    client.execute(request, ok_record::<R>).await
}

/// `DELETE /{plural}/{name}`, returning the deleted resource
pub async fn delete<R: Resource>(
    client: &Client,
    name: &str,
    environment: Option<&str>,
) -> Result<Response<R>> {
    let request = Request::delete(item::<R>(name)).query("environment", environment);
    client.execute(request, ok_record::<R>).await
}

/// `GET /{plural}/{name}/metrics`
pub async fn metrics<R: Resource>(
    client: &Client,
    name: &str,
    environment: Option<&str>,
) -> Result<Response<ResourceMetrics>> {
    let mut path = item::<R>(name);
    path.push("metrics".to_string());
    let request = Request::get(path).query("environment", environment);
    client.execute(request, ok_record::<ResourceMetrics>).await
}

/// `GET /{plural}/{name}/deployments/{environment}/logs`
pub async fn deployment_logs<R: Resource>(
    client: &Client,
    name: &str,
    environment: &str,
) -> Result<Response<Vec<ResourceDeploymentLog>>> {
    let mut path = item::<R>(name);
    path.extend(["deployments", environment, "logs"].map(String::from));
    client
        .execute(Request::get(path), ok_records::<ResourceDeploymentLog>)
        .await
}

/// Create or replace: `PUT`, falling back to `POST` when the resource does not exist yet
pub async fn apply<R: Resource>(client: &Client, body: &R) -> Result<Applied<R>> {
    let name = body
        .name()
        .ok_or_else(|| Error::config(format!("{} is missing metadata.name", R::KIND)))?
        .to_string();

    let request = Request::put(item::<R>(&name)).json(body.encode());
    let updated = client
        .execute(request, |status, content| {
            if status == StatusCode::NOT_FOUND {
                Ok(Outcome::Empty)
            } else {
                ok_record::<R>(status, content)
            }
        })
        .await?;

    if updated.status == StatusCode::NOT_FOUND {
        debug!(kind = R::KIND, name = %name, "Not found, creating");
        let created = create(client, body).await?;
        return into_applied(created, Applied::Created);
    }
    into_applied(updated, Applied::Configured)
}

fn into_applied<R>(response: Response<R>, wrap: fn(R) -> Applied<R>) -> Result<Applied<R>> {
    match response.parsed {
        Some(resource) => Ok(wrap(resource)),
        None => Err(Error::UnexpectedStatus {
            status: response.status,
            body: String::from_utf8_lossy(&response.content).into_owned(),
        }),
    }
}

/// Result of [`apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum Applied<R> {
    Configured(R),
    Created(R),
}

impl<R> Applied<R> {
    pub fn action(&self) -> &'static str {
        match self {
            Applied::Configured(_) => "configured",
            Applied::Created(_) => "created",
        }
    }

    pub fn into_inner(self) -> R {
        match self {
            Applied::Configured(r) | Applied::Created(r) => r,
        }
    }
}
