//! Function endpoints

use crate::api::resource;
use crate::client::{Client, Response};
use crate::error::Result;
use crate::models::{Function, ResourceMetrics};

pub async fn list_functions(
    client: &Client,
    environment: Option<&str>,
) -> Result<Response<Vec<Function>>> {
    resource::list(client, environment).await
}

pub async fn get_function(
    client: &Client,
    function_name: &str,
    environment: Option<&str>,
) -> Result<Response<Function>> {
    resource::get(client, function_name, environment).await
}

pub async fn create_function(client: &Client, body: &Function) -> Result<Response<Function>> {
    resource::create(client, body).await
}

pub async fn update_function(
    client: &Client,
    function_name: &str,
    body: &Function,
) -> Result<Response<Function>> {
    resource::update(client, function_name, body).await
}

pub async fn delete_function(
    client: &Client,
    function_name: &str,
    environment: Option<&str>,
) -> Result<Response<Function>> {
    resource::delete::<Function>(client, function_name, environment).await
}

pub async fn get_function_metrics(
    client: &Client,
    function_name: &str,
    environment: Option<&str>,
) -> Result<Response<ResourceMetrics>> {
    resource::metrics::<Function>(client, function_name, environment).await
}
