//! Domain Services
//!
//! Resolution and composition logic. Everything that would touch a real
//! provider goes through the `Provisioner` and `SourceConnector` ports.

mod domain_resolver;
mod pipeline_graph;
mod service_topology;
mod stage_composer;
mod zone_delegator;

pub use domain_resolver::{DomainResolver, ResolvedDomain, DEFAULT_PRODUCTION_LABEL};
pub use pipeline_graph::{PipelineGraph, PipelineOutline, CACHE_BUCKET_ID, DOCKER_HUB_REGISTRY};
pub use service_topology::{
    ingress_rules, NetworkHandle, ServiceHandle, ServiceTopologyBuilder, EXTERNAL_SECURED_PORT,
    HEALTH_CHECK_TIMEOUT_SECS, SCALING_COOLDOWN_SECS, SCALING_TARGET_UTILIZATION_PERCENT,
};
pub use stage_composer::{StageComposer, StageNode, DEFAULT_NETWORK_CIDR, NETWORK_MAX_AZS};
pub use zone_delegator::{DelegationRequest, HostedZoneDelegator};
