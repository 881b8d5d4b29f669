//! Functions and their parameters

use crate::codec::JsonMap;
use crate::record;

use super::common::{Flavor, Metadata, Runtime, ServerlessConfig};

record! {
    /// Parameter of a store function
    pub struct StoreFunctionParameter {
        optional description: String = "description",
        optional name: String = "name",
        optional required: bool = "required",
        /// JSON type: string, number, integer or boolean
        optional type_: String = "type",
    }
}

record! {
    /// One function of a function kit
    pub struct FunctionKit {
        optional description: String = "description",
        optional name: String = "name",
        optional parameters: Vec<StoreFunctionParameter> = "parameters",
    }
}

record! {
    /// Function specification
    pub struct FunctionSpec {
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
        optional description: String = "description",
        /// Sub-functions exposed when the function is a kit
        optional kit: Vec<FunctionKit> = "kit",
        optional parameters: Vec<StoreFunctionParameter> = "parameters",
        optional store_id: String = "store_id",
    }
}

record! {
    /// Function
    pub struct Function {
        optional metadata: Metadata = "metadata",
        optional spec: FunctionSpec = "spec",
        optional status: String = "status",
    }
}

impl Function {
    pub fn new(name: impl Into<String>, spec: FunctionSpec) -> Self {
        Self {
            metadata: Metadata::named(name).into(),
            spec: spec.into(),
            ..Default::default()
        }
    }
}
