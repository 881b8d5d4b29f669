//! Data models used in API inputs and outputs

pub mod agent;
pub mod common;
pub mod function;
pub mod metrics;
pub mod model;
pub mod workspace;

pub use agent::{
    Agent, AgentChain, AgentDeploymentHistory, AgentDeploymentHistoryEvent, AgentSpec,
    StoreAgentConfiguration,
};
pub use common::{Flavor, Labels, Metadata, ModelProviderRef, Runtime, ServerlessConfig};
pub use function::{Function, FunctionKit, FunctionSpec, StoreFunctionParameter};
pub use metrics::{Metric, ModelMetrics, ResourceMetrics, ResourceDeploymentLog};
pub use model::{Model, ModelDeployment, ModelSpec, ModelWithDeployments};
pub use workspace::{
    InviteWorkspaceUserBody, PendingInvitationAccept, UpdateWorkspaceUserRoleBody, Workspace,
    WorkspaceUser,
};

use crate::codec::Record;

/// A top-level resource addressed as `/{plural}/{name}`
pub trait Resource: Record + Send + Sync {
    /// Manifest kind, e.g. `Agent`
    const KIND: &'static str;
    /// Path segment, e.g. `agents`
    const PLURAL: &'static str;
    /// Singular CLI alias
    const SINGULAR: &'static str;

    fn metadata(&self) -> Option<&Metadata>;

    fn name(&self) -> Option<&str> {
        self.metadata().and_then(|m| m.name.as_deref())
    }
}

impl Resource for Agent {
    const KIND: &'static str = "Agent";
    const PLURAL: &'static str = "agents";
    const SINGULAR: &'static str = "agent";

    fn metadata(&self) -> Option<&Metadata> {
        self.metadata.value()
    }
}

impl Resource for Function {
    const KIND: &'static str = "Function";
    const PLURAL: &'static str = "functions";
    const SINGULAR: &'static str = "function";

    fn metadata(&self) -> Option<&Metadata> {
        self.metadata.value()
    }
}

impl Resource for Model {
    const KIND: &'static str = "Model";
    const PLURAL: &'static str = "models";
    const SINGULAR: &'static str = "model";

    fn metadata(&self) -> Option<&Metadata> {
        self.metadata.value()
    }
}
