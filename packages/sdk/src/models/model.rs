//! Models and model deployments

use crate::codec::JsonMap;
use crate::record;

use super::common::{Flavor, Labels, Metadata, ModelProviderRef, Runtime, ServerlessConfig};

record! {
    /// Model specification
    pub struct ModelSpec {
        optional configurations: JsonMap = "configurations",
        optional enabled: bool = "enabled",
        optional flavors: Vec<Flavor> = "flavors",
        optional integration_connections: Vec<String> = "integration_connections",
        optional pod_template: JsonMap = "pod_template",
        optional policies: Vec<String> = "policies",
        optional private_clusters: JsonMap = "private_clusters",
        optional runtime: Runtime = "runtime",
        optional sandbox: bool = "sandbox",
        optional serverless_config: ServerlessConfig = "serverless_config",
    }
}

record! {
    /// Logical object representing a model
    pub struct Model {
        optional metadata: Metadata = "metadata",
        optional spec: ModelSpec = "spec",
        optional status: String = "status",
    }
}

impl Model {
    pub fn new(name: impl Into<String>, spec: ModelSpec) -> Self {
        Self {
            metadata: Metadata::named(name).into(),
            spec: spec.into(),
            ..Default::default()
        }
    }
}

record! {
    /// An instance of a model, deployed in a specific environment
    pub struct ModelDeployment {
        optional created_at: String = "created_at",
        optional created_by: String = "created_by",
        optional updated_at: String = "updated_at",
        optional updated_by: String = "updated_by",
        /// If false, the model deployment will not be active nor serve requests
        optional enabled: bool = "enabled",
        optional environment: String = "environment",
        optional flavors: Vec<Flavor> = "flavors",
        optional labels: Labels = "labels",
        optional metric_port: u16 = "metric_port",
        /// The name of the parent model
        optional model: String = "model",
        optional model_provider_ref: ModelProviderRef = "model_provider_ref",
        /// Kubernetes PodTemplateSpec, passed through untouched
        optional pod_template: JsonMap = "pod_template",
        optional policies: Vec<String> = "policies",
        optional runtime: Runtime = "runtime",
        optional serverless_config: ServerlessConfig = "serverless_config",
        optional serving_port: u16 = "serving_port",
        optional workspace: String = "workspace",
    }
}

record! {
    /// A model with its deployment definitions inlined
    pub struct ModelWithDeployments {
        optional created_at: String = "created_at",
        optional created_by: String = "created_by",
        optional updated_at: String = "updated_at",
        optional updated_by: String = "updated_by",
        optional display_name: String = "display_name",
        optional labels: Labels = "labels",
        optional name: String = "name",
        optional workspace: String = "workspace",
        optional deployments: Vec<ModelDeployment> = "deployments",
    }
}
