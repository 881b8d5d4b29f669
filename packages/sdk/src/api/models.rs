//! Model endpoints

use crate::api::{ok_record, ok_records, resource};
use crate::client::{Client, Request, Response};
use crate::error::Result;
use crate::models::{Model, ModelDeployment, ModelMetrics, ModelWithDeployments};

pub async fn list_models(client: &Client, environment: Option<&str>) -> Result<Response<Vec<Model>>> {
    resource::list(client, environment).await
}

pub async fn get_model(
    client: &Client,
    model_name: &str,
    environment: Option<&str>,
) -> Result<Response<Model>> {
    resource::get(client, model_name, environment).await
}

pub async fn create_model(client: &Client, body: &Model) -> Result<Response<Model>> {
    resource::create(client, body).await
}

pub async fn update_model(client: &Client, model_name: &str, body: &Model) -> Result<Response<Model>> {
    resource::update(client, model_name, body).await
}

pub async fn delete_model(
    client: &Client,
    model_name: &str,
    environment: Option<&str>,
) -> Result<Response<Model>> {
    resource::delete::<Model>(client, model_name, environment).await
}

/// Returns metrics for a model by name
pub async fn get_model_metrics(
    client: &Client,
    model_name: &str,
    environment: Option<&str>,
) -> Result<Response<ModelMetrics>> {
    resource::metrics::<Model>(client, model_name, environment).await
}

/// Deployments of a model across environments
pub async fn list_model_deployments(
    client: &Client,
    model_name: &str,
) -> Result<Response<Vec<ModelDeployment>>> {
    let request = Request::get(["models", model_name, "deployments"]);
    client.execute(request, ok_records::<ModelDeployment>).await
}

/// A model with its deployments inlined
pub async fn get_model_with_deployments(
    client: &Client,
    model_name: &str,
) -> Result<Response<ModelWithDeployments>> {
    let request = Request::get(["models", model_name]).query("deployments", Some("true"));
    client.execute(request, ok_record::<ModelWithDeployments>).await
}
