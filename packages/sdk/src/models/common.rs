//! Building blocks shared by agents, functions and models

use std::collections::BTreeMap;

use crate::codec::{Field, JsonMap};
use crate::{record, record_union};

record_union! {
    /// Resource labels: a string map when well-formed, anything else verbatim
    pub enum Labels {
        Map(BTreeMap<String, String>),
    }
}

impl Labels {
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            Labels::Map(map) => map.get(key).map(String::as_str),
            Labels::Raw(_) => None,
        }
    }
}

record! {
    /// Common metadata carried by every top-level resource
    pub struct Metadata {
        /// The date and time when the resource was created
        optional created_at: String = "created_at",
        /// The user or service account who created the resource
        optional created_by: String = "created_by",
        /// The date and time when the resource was updated
        optional updated_at: String = "updated_at",
        /// The user or service account who updated the resource
        optional updated_by: String = "updated_by",
        optional display_name: String = "display_name",
        /// Environment the resource is deployed in
        optional environment: String = "environment",
        optional labels: Labels = "labels",
        optional name: String = "name",
        optional workspace: String = "workspace",
    }
}

impl Metadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Field::Present(name.into()),
            ..Default::default()
        }
    }
}

record! {
    /// A type of hardware available for deployments
    pub struct Flavor {
        optional name: String = "name",
        /// cpu or gpu
        optional type_: String = "type",
    }
}

record! {
    /// Reference to a model provider
    pub struct ModelProviderRef {
        optional name: String = "name",
        optional type_: String = "type",
        optional url: String = "url",
    }
}

record! {
    /// Set of configurations for a deployment
    pub struct Runtime {
        optional args: Vec<String> = "args",
        optional command: Vec<String> = "command",
        /// Environment variables, passed through untouched
        optional envs: Vec<serde_json::Value> = "envs",
        optional image: String = "image",
        optional metric_port: u16 = "metric_port",
        optional model: String = "model",
        optional readiness_probe: JsonMap = "readiness_probe",
        optional resources: JsonMap = "resources",
        optional serving_port: u16 = "serving_port",
        optional type_: String = "type",
    }
}

record! {
    /// Configuration for a serverless deployment
    pub struct ServerlessConfig {
        optional last_pod_retention_period: String = "last_pod_retention_period",
        optional max_num_replicas: i64 = "max_num_replicas",
        /// Metric to scale on: cpu, memory, rps or concurrency
        optional metric: String = "metric",
        optional min_num_replicas: i64 = "min_num_replicas",
        optional scale_down_delay: String = "scale_down_delay",
        optional scale_up_minimum: i64 = "scale_up_minimum",
        optional stable_window: String = "stable_window",
        /// Target value for the metric
        optional target: String = "target",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Record;
    use serde_json::json;

    fn object(value: serde_json::Value) -> JsonMap {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_labels_string_map() {
        let metadata = Metadata::decode(object(json!({
            "name": "my-agent",
            "labels": {"team": "search"}
        })))
        .unwrap();

        let labels = metadata.labels.value().unwrap();
        assert_eq!(labels.get("team"), Some("search"));
        assert!(!labels.is_raw());
    }

    #[test]
    fn test_labels_raw_fallback_for_other_shapes() {
        let metadata = Metadata::decode(object(json!({"labels": "legacy"}))).unwrap();
        assert_eq!(
            metadata.labels,
            Field::Present(Labels::Raw(json!("legacy")))
        );
    }

    #[test]
    fn test_runtime_port_out_of_range() {
        let err = Runtime::decode(object(json!({"serving_port": 123456}))).unwrap_err();
        assert_eq!(err.record, "Runtime");
        assert_eq!(err.field, "serving_port");
    }

    #[test]
    fn test_metadata_named() {
        let metadata = Metadata::named("fn-1");
        assert_eq!(metadata.encode(), object(json!({"name": "fn-1"})));
    }
}
