//! Typed resource declarations handed to the provisioning provider

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::ports::{ResourceHandle, SourceInput};

/// What happens to a record when its stack is torn down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    Destroy,
    Retain,
}

/// Ingress source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "cidr", rename_all = "snake_case")]
pub enum Peer {
    AnyIpv4,
    Ipv4(String),
}

/// Ingress port selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "port", rename_all = "snake_case")]
pub enum PortRange {
    Tcp(u16),
    AllTcp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngressRule {
    pub peer: Peer,
    pub port: PortRange,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApplicationProtocol {
    Http,
    Https,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransportProtocol {
    Tcp,
}

/// Build compute size for asset publishing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComputeType {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackSpec {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkSpec {
    pub name: String,
    pub max_azs: u8,
    pub cidr: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostedZoneSpec {
    pub zone_name: String,
}

/// Reference to a zone that already exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostedZoneImport {
    pub hosted_zone_id: String,
    pub zone_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleImport {
    pub role_arn: String,
}

/// NS record written directly into the parent zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZoneDelegationRecordSpec {
    pub parent_zone: ResourceHandle,
    pub record_name: String,
    /// Name servers are those assigned to this zone
    pub name_servers_of: ResourceHandle,
}

/// NS record written into a parent zone in another account via an assumed role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossAccountDelegationRecordSpec {
    pub delegated_zone: ResourceHandle,
    pub delegation_role: ResourceHandle,
    pub parent_hosted_zone_id: String,
    pub removal_policy: RemovalPolicy,
}

/// DNS-validated certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateSpec {
    pub domain_name: String,
    pub validation_zone: ResourceHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateImport {
    pub certificate_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterSpec {
    pub network: ResourceHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityGroupSpec {
    pub network: ResourceHandle,
    pub allow_all_outbound: bool,
    pub description: String,
    pub ingress: Vec<IngressRule>,
}

/// Container image built from a local directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageAsset {
    pub directory: PathBuf,
    pub dockerfile: String,
    pub rebuild_on_file_change: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortMapping {
    pub container_port: u16,
    pub host_port: u16,
    pub protocol: TransportProtocol,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSpec {
    pub name: String,
    pub image: ImageAsset,
    pub port_mappings: Vec<PortMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskDefinitionSpec {
    pub cpu: u32,
    pub memory_mib: u32,
    pub container: ContainerSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckSpec {
    pub enabled: bool,
    pub path: String,
    pub port: u16,
    pub protocol: ApplicationProtocol,
    pub timeout_secs: u64,
}

/// Public load balancer in front of a container service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadBalancedServiceSpec {
    pub service_name: String,
    pub cluster: ResourceHandle,
    pub task_definition: ResourceHandle,
    pub certificate: ResourceHandle,
    pub security_groups: Vec<ResourceHandle>,
    pub listener_port: u16,
    pub protocol: ApplicationProtocol,
    pub target_protocol: ApplicationProtocol,
    pub public_load_balancer: bool,
    pub assign_public_ip: bool,
    pub health_check: HealthCheckSpec,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingMetric {
    Cpu,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScalingPolicy {
    pub name: String,
    pub metric: ScalingMetric,
    pub target_utilization_percent: u8,
    pub scale_in_cooldown_secs: u64,
    pub scale_out_cooldown_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoScalingSpec {
    pub service: ResourceHandle,
    pub min_capacity: u32,
    pub max_capacity: u32,
    pub policies: Vec<ScalingPolicy>,
}

/// A record aliasing a domain name to a load balancer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasRecordSpec {
    pub zone: ResourceHandle,
    pub record_name: String,
    pub target: ResourceHandle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DockerCredential {
    pub registry: String,
    pub secret_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthStep {
    pub name: String,
    pub input: SourceInput,
    pub commands: Vec<String>,
    pub additional_inputs: BTreeMap<String, SourceInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSpec {
    pub name: String,
    pub synth: SynthStep,
    pub self_mutation: bool,
    pub docker_credentials: Vec<DockerCredential>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_cache: Option<ResourceHandle>,
    pub asset_compute_type: ComputeType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStageSpec {
    pub label: String,
    pub account: String,
    pub region: String,
    pub position: usize,
}

/// A resource declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resource {
    Stack(StackSpec),
    Network(NetworkSpec),
    HostedZone(HostedZoneSpec),
    HostedZoneImport(HostedZoneImport),
    RoleImport(RoleImport),
    ZoneDelegationRecord(ZoneDelegationRecordSpec),
    CrossAccountDelegationRecord(CrossAccountDelegationRecordSpec),
    Certificate(CertificateSpec),
    CertificateImport(CertificateImport),
    Cluster(ClusterSpec),
    SecurityGroup(SecurityGroupSpec),
    TaskDefinition(TaskDefinitionSpec),
    LoadBalancedService(LoadBalancedServiceSpec),
    AutoScaling(AutoScalingSpec),
    AliasRecord(AliasRecordSpec),
    CacheBucket,
    Pipeline(PipelineSpec),
    PipelineStage(PipelineStageSpec),
}

impl Resource {
    /// Stable kind name, matching the serialized `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Stack(_) => "stack",
            Resource::Network(_) => "network",
            Resource::HostedZone(_) => "hosted_zone",
            Resource::HostedZoneImport(_) => "hosted_zone_import",
            Resource::RoleImport(_) => "role_import",
            Resource::ZoneDelegationRecord(_) => "zone_delegation_record",
            Resource::CrossAccountDelegationRecord(_) => "cross_account_delegation_record",
            Resource::Certificate(_) => "certificate",
            Resource::CertificateImport(_) => "certificate_import",
            Resource::Cluster(_) => "cluster",
            Resource::SecurityGroup(_) => "security_group",
            Resource::TaskDefinition(_) => "task_definition",
            Resource::LoadBalancedService(_) => "load_balanced_service",
            Resource::AutoScaling(_) => "auto_scaling",
            Resource::AliasRecord(_) => "alias_record",
            Resource::CacheBucket => "cache_bucket",
            Resource::Pipeline(_) => "pipeline",
            Resource::PipelineStage(_) => "pipeline_stage",
        }
    }

    /// Handles this declaration refers to
    pub fn references(&self) -> Vec<&ResourceHandle> {
        match self {
            Resource::ZoneDelegationRecord(r) => vec![&r.parent_zone, &r.name_servers_of],
            Resource::CrossAccountDelegationRecord(r) => {
                vec![&r.delegated_zone, &r.delegation_role]
            }
            Resource::Certificate(c) => vec![&c.validation_zone],
            Resource::Cluster(c) => vec![&c.network],
            Resource::SecurityGroup(sg) => vec![&sg.network],
            Resource::LoadBalancedService(s) => {
                let mut refs = vec![&s.cluster, &s.task_definition, &s.certificate];
                refs.extend(s.security_groups.iter());
                refs
            }
            Resource::AutoScaling(a) => vec![&a.service],
            Resource::AliasRecord(a) => vec![&a.zone, &a.target],
            Resource::Pipeline(p) => p.asset_cache.iter().collect(),
            _ => Vec::new(),
        }
    }
}
