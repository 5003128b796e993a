//! Service topology builder
//!
//! Declares everything one service needs inside its stack: zone binding and
//! certificate, cluster, security group, task definition, load-balanced
//! service with health check, autoscaling and the alias record.

use serde::Serialize;

use crate::domain::entities::{
    AliasRecordSpec, ApplicationProtocol, AutoScalingSpec, CertificateImport, CertificateSpec,
    ClusterSpec, ContainerSpec, DomainPolicy, HealthCheckSpec, HostedZone, HostedZoneImport,
    ImageAsset, IngressRule, LoadBalancedServiceSpec, Peer, PortMapping, PortRange, PresetZone,
    Resource, ScalingMetric, ScalingPolicy, SecurityGroupSpec, ServiceDescriptor,
    StageDescriptor, TaskDefinitionSpec, TransportProtocol, ZoneBinding, ZoneSource,
};
use crate::domain::ports::{Provisioner, ResourceHandle};
use crate::domain::value_objects::Packaging;
use crate::error::PlanResult;

use super::{DelegationRequest, DomainResolver, HostedZoneDelegator};

/// Public TLS listener port
pub const EXTERNAL_SECURED_PORT: u16 = 443;

pub const HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

pub const SCALING_TARGET_UTILIZATION_PERCENT: u8 = 50;

pub const SCALING_COOLDOWN_SECS: u64 = 10;

/// A stage's network, as seen by the services placed in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkHandle {
    pub stack: ResourceHandle,
    pub network: ResourceHandle,
    pub cidr: String,
}

/// Everything declared for one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceHandle {
    pub service_name: String,
    pub stack: ResourceHandle,
    pub zone: ZoneBinding,
    pub domain_name: String,
    pub certificate: ResourceHandle,
    pub cluster: ResourceHandle,
    pub security_group: ResourceHandle,
    pub task_definition: ResourceHandle,
    pub load_balanced_service: ResourceHandle,
    pub auto_scaling: ResourceHandle,
    pub alias_record: ResourceHandle,
}

/// The ingress rule set of every service: its own port and 443 from
/// anywhere, plus all TCP from inside the network. Nothing else.
pub fn ingress_rules(service_port: u16, network_cidr: &str) -> Vec<IngressRule> {
    vec![
        IngressRule {
            peer: Peer::AnyIpv4,
            port: PortRange::Tcp(service_port),
            description: format!(
                "Allow service request to enter through port {}",
                service_port
            ),
        },
        IngressRule {
            peer: Peer::AnyIpv4,
            port: PortRange::Tcp(EXTERNAL_SECURED_PORT),
            description: format!(
                "Allow service request to enter through port {}",
                EXTERNAL_SECURED_PORT
            ),
        },
        IngressRule {
            peer: Peer::Ipv4(network_cidr.to_string()),
            port: PortRange::AllTcp,
            description: "Allow service request to enter through within the network".to_string(),
        },
    ]
}

fn scaling_policy(name: &str, metric: ScalingMetric) -> ScalingPolicy {
    ScalingPolicy {
        name: name.to_string(),
        metric,
        target_utilization_percent: SCALING_TARGET_UTILIZATION_PERCENT,
        scale_in_cooldown_secs: SCALING_COOLDOWN_SECS,
        scale_out_cooldown_secs: SCALING_COOLDOWN_SECS,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceTopologyBuilder<'a> {
    resolver: &'a DomainResolver,
    policy: &'a DomainPolicy,
    packaging: &'a Packaging,
}

impl<'a> ServiceTopologyBuilder<'a> {
    pub fn new(
        resolver: &'a DomainResolver,
        policy: &'a DomainPolicy,
        packaging: &'a Packaging,
    ) -> Self {
        Self {
            resolver,
            policy,
            packaging,
        }
    }

    /// Declare the full topology of `descriptor` inside `stack`.
    pub fn build(
        &self,
        provisioner: &mut dyn Provisioner,
        stack: &ResourceHandle,
        stage: &StageDescriptor,
        network: &NetworkHandle,
        descriptor: &ServiceDescriptor,
    ) -> PlanResult<ServiceHandle> {
        descriptor.validate()?;
        let prefix = descriptor.service_prefix.as_str();

        let (zone, certificate) = self.bind_zone(provisioner, stack, stage, descriptor)?;

        let cluster = provisioner.declare(
            Some(stack),
            &format!("{}Cluster", prefix),
            Resource::Cluster(ClusterSpec {
                network: network.network.clone(),
            }),
        )?;

        let security_group = provisioner.declare(
            Some(stack),
            &format!("{}SecurityGroup", prefix),
            Resource::SecurityGroup(SecurityGroupSpec {
                network: network.network.clone(),
                allow_all_outbound: true,
                description: format!("Default security group for {}", descriptor.service_name),
                ingress: ingress_rules(descriptor.port, &network.cidr),
            }),
        )?;

        let task_definition = provisioner.declare(
            Some(stack),
            &format!("{}TaskDefinition", prefix),
            Resource::TaskDefinition(TaskDefinitionSpec {
                cpu: descriptor.cpu,
                memory_mib: descriptor.memory,
                container: ContainerSpec {
                    name: format!("{}Container", prefix),
                    image: ImageAsset {
                        directory: self.packaging.resolve(&descriptor.package_path),
                        dockerfile: descriptor.dockerfile_name.clone(),
                        rebuild_on_file_change: true,
                    },
                    port_mappings: vec![PortMapping {
                        container_port: descriptor.port,
                        host_port: descriptor.port,
                        protocol: TransportProtocol::Tcp,
                    }],
                },
            }),
        )?;

        let load_balanced_service = provisioner.declare(
            Some(stack),
            &format!("{}FargateService", prefix),
            Resource::LoadBalancedService(LoadBalancedServiceSpec {
                service_name: format!("{}FargateService", prefix),
                cluster: cluster.clone(),
                task_definition: task_definition.clone(),
                certificate: certificate.clone(),
                security_groups: vec![security_group.clone()],
                listener_port: EXTERNAL_SECURED_PORT,
                protocol: ApplicationProtocol::Https,
                target_protocol: ApplicationProtocol::Http,
                public_load_balancer: true,
                assign_public_ip: true,
                health_check: HealthCheckSpec {
                    enabled: true,
                    path: descriptor.health_check_path.clone(),
                    port: descriptor.port,
                    protocol: ApplicationProtocol::Http,
                    timeout_secs: HEALTH_CHECK_TIMEOUT_SECS,
                },
            }),
        )?;

        let auto_scaling = provisioner.declare(
            Some(stack),
            &format!("{}Scaling", prefix),
            Resource::AutoScaling(AutoScalingSpec {
                service: load_balanced_service.clone(),
                min_capacity: descriptor.min_capacity,
                max_capacity: descriptor.max_capacity,
                policies: vec![
                    scaling_policy("CpuScaling", ScalingMetric::Cpu),
                    scaling_policy("MemoryScaling", ScalingMetric::Memory),
                ],
            }),
        )?;

        let domain_name = zone.zone_name().to_string();
        let alias_record = provisioner.declare(
            Some(stack),
            &format!("{}Record", prefix),
            Resource::AliasRecord(AliasRecordSpec {
                zone: zone.zone_handle().clone(),
                record_name: domain_name.clone(),
                target: load_balanced_service.clone(),
            }),
        )?;

        tracing::info!(
            service = %descriptor.service_name,
            stage = %stage.label,
            domain = %domain_name,
            preset = zone.is_preset(),
            "built service topology"
        );

        Ok(ServiceHandle {
            service_name: descriptor.service_name.clone(),
            stack: stack.clone(),
            zone,
            domain_name,
            certificate,
            cluster,
            security_group,
            task_definition,
            load_balanced_service,
            auto_scaling,
            alias_record,
        })
    }

    /// Bind the preset zone/certificate, or delegate a fresh child zone and
    /// request a certificate validated against it. Never both.
    fn bind_zone(
        &self,
        provisioner: &mut dyn Provisioner,
        stack: &ResourceHandle,
        stage: &StageDescriptor,
        descriptor: &ServiceDescriptor,
    ) -> PlanResult<(ZoneBinding, ResourceHandle)> {
        let prefix = descriptor.service_prefix.as_str();

        match &descriptor.zone {
            ZoneSource::Preset(preset) => {
                let zone = provisioner.declare(
                    Some(stack),
                    &format!("{}DomainDelegation", prefix),
                    Resource::HostedZoneImport(HostedZoneImport {
                        hosted_zone_id: preset.hosted_zone_id.clone(),
                        zone_name: preset.hosted_zone_name.clone(),
                    }),
                )?;
                let certificate = provisioner.declare(
                    Some(stack),
                    &format!("{}Certificate", prefix),
                    Resource::CertificateImport(CertificateImport {
                        certificate_arn: preset.certificate_arn.clone(),
                    }),
                )?;
                let binding = ZoneBinding::Preset(PresetZone {
                    zone,
                    hosted_zone_id: preset.hosted_zone_id.clone(),
                    zone_name: preset.hosted_zone_name.clone(),
                    certificate_arn: preset.certificate_arn.clone(),
                });
                Ok((binding, certificate))
            }
            ZoneSource::Delegated { base_subdomain } => {
                let resolved = self.resolver.resolve_for(stage, self.policy, base_subdomain);
                tracing::debug!(
                    zone = %resolved.child_zone_name,
                    cross_account = resolved.requires_cross_account_delegation,
                    "resolved child zone"
                );

                let delegated = HostedZoneDelegator::new(self.policy).delegate(
                    provisioner,
                    stack,
                    &DelegationRequest {
                        child_zone_name: &resolved.child_zone_name,
                        child_account_id: &stage.account_id,
                        service_prefix: prefix,
                        service_name: &descriptor.service_name,
                    },
                )?;
                let certificate = provisioner.declare(
                    Some(stack),
                    &format!("{}Certificate", prefix),
                    Resource::Certificate(CertificateSpec {
                        domain_name: resolved.child_zone_name.clone(),
                        validation_zone: delegated.zone.clone(),
                    }),
                )?;
                Ok((ZoneBinding::Delegated(delegated), certificate))
            }
        }
    }
}
