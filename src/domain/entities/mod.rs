//! Domain Entities
//!
//! Descriptors read from configuration, resource declarations and the
//! resulting provisioning plan.

mod domain_policy;
mod plan;
mod repository;
mod resource;
mod service;
mod stage;
mod zone;

pub use domain_policy::DomainPolicy;
pub use plan::{DependencyEdge, PlannedResource, ProvisioningPlan};
pub use repository::RepoDescriptor;
pub use resource::{
    AliasRecordSpec, ApplicationProtocol, AutoScalingSpec, CertificateImport, CertificateSpec,
    ClusterSpec, ComputeType, ContainerSpec, CrossAccountDelegationRecordSpec, DockerCredential,
    HealthCheckSpec, HostedZoneImport, HostedZoneSpec, ImageAsset, IngressRule,
    LoadBalancedServiceSpec, NetworkSpec, Peer, PipelineSpec, PipelineStageSpec, PortMapping,
    PortRange, RemovalPolicy, Resource, RoleImport, ScalingMetric, ScalingPolicy,
    SecurityGroupSpec, StackSpec, SynthStep, TaskDefinitionSpec, TransportProtocol,
    ZoneDelegationRecordSpec,
};
pub use service::{
    NonProductionOverrides, PresetHostedZoneAndCertificate, ServiceDescriptor, ServiceTemplate,
    ZoneSource,
};
pub use stage::StageDescriptor;
pub(crate) use stage::{is_construct_name, is_dns_label};
pub use zone::{DelegatedZone, DelegationKind, HostedZone, PresetZone, ZoneBinding};
