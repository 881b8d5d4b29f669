//! Metrics and deployment logs

use std::collections::BTreeMap;

use serde_json::Number;

use crate::record;

record! {
    /// A single data point
    pub struct Metric {
        optional rate: Number = "rate",
        optional request_total: Number = "request_total",
        optional timestamp: String = "timestamp",
    }
}

record! {
    /// Metrics of an agent, function or model
    pub struct ResourceMetrics {
        /// Historical requests, all environments
        optional inference_global: Vec<Metric> = "inference_global",
        /// Number of requests over time
        optional query: Vec<Metric> = "query",
        optional request_total: Number = "request_total",
        /// Total requests keyed by HTTP status code
        optional request_total_per_code: BTreeMap<String, Number> = "request_total_per_code",
        /// Requests per second
        optional rps: Number = "rps",
        optional rps_per_code: BTreeMap<String, Number> = "rps_per_code",
    }
}

/// Metrics returned by the model metrics endpoint
pub type ModelMetrics = ResourceMetrics;

record! {
    /// A log line of a resource deployment
    pub struct ResourceDeploymentLog {
        optional message: String = "message",
        optional timestamp: String = "timestamp",
    }
}
