//! Stage composition
//!
//! One network stack per stage, one stack per service, and an explicit
//! dependency edge from every service stack onto the network stack.

use serde::Serialize;

use crate::domain::entities::{
    DependencyEdge, DomainPolicy, NetworkSpec, Resource, ServiceDescriptor, StackSpec,
    StageDescriptor,
};
use crate::domain::ports::{Provisioner, ResourceHandle};
use crate::domain::value_objects::{AccountId, Packaging};
use crate::error::{PlanError, PlanResult};

use super::{DomainResolver, NetworkHandle, ServiceHandle, ServiceTopologyBuilder};

pub const DEFAULT_NETWORK_CIDR: &str = "10.0.0.0/16";

/// Every stage network spans a single availability zone.
pub const NETWORK_MAX_AZS: u8 = 1;

/// A composed stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageNode {
    pub label: String,
    pub account_id: AccountId,
    pub region: String,
    /// Pipeline stage scope the stacks were declared under
    pub stage: ResourceHandle,
    pub network: NetworkHandle,
    pub services: Vec<ServiceHandle>,
    pub edges: Vec<DependencyEdge>,
}

#[derive(Debug, Clone, Copy)]
pub struct StageComposer<'a> {
    service_prefix: &'a str,
    resolver: &'a DomainResolver,
    policy: &'a DomainPolicy,
    packaging: &'a Packaging,
}

impl<'a> StageComposer<'a> {
    pub fn new(
        service_prefix: &'a str,
        resolver: &'a DomainResolver,
        policy: &'a DomainPolicy,
        packaging: &'a Packaging,
    ) -> Self {
        Self {
            service_prefix,
            resolver,
            policy,
            packaging,
        }
    }

    pub fn network_stack_id(&self, stage_label: &str) -> String {
        format!("{}VpcStack-{}", self.service_prefix, stage_label)
    }

    pub fn network_name(&self, stage_label: &str) -> String {
        format!("{}VPC-{}", self.service_prefix, stage_label)
    }

    /// Compose `stage` under `scope`.
    ///
    /// The stage and every descriptor are validated before anything is
    /// declared.
    pub fn compose(
        &self,
        provisioner: &mut dyn Provisioner,
        scope: &ResourceHandle,
        stage: &StageDescriptor,
        services: &[ServiceDescriptor],
    ) -> PlanResult<StageNode> {
        stage.validate()?;
        if services.is_empty() {
            return Err(PlanError::EmptyStage {
                label: stage.label.clone(),
            });
        }
        for descriptor in services {
            descriptor.validate()?;
        }

        let network = self.declare_network(provisioner, scope, stage)?;
        let builder = ServiceTopologyBuilder::new(self.resolver, self.policy, self.packaging);

        let mut handles = Vec::with_capacity(services.len());
        let mut edges = Vec::with_capacity(services.len());
        for descriptor in services {
            let stack = provisioner.declare(
                Some(scope),
                &format!("{}-{}", descriptor.service_name, stage.label),
                Resource::Stack(StackSpec {
                    name: format!("{}-{}", descriptor.service_name, stage.label),
                    account: Some(stage.account_id.to_string()),
                    region: Some(stage.region.clone()),
                }),
            )?;

            let handle = builder.build(provisioner, &stack, stage, &network, descriptor)?;

            provisioner.add_dependency(&stack, &network.stack)?;
            edges.push(DependencyEdge::new(stack, network.stack.clone()));
            handles.push(handle);
        }

        tracing::info!(
            stage = %stage.label,
            account = %stage.account_id,
            services = handles.len(),
            "composed stage"
        );

        Ok(StageNode {
            label: stage.label.clone(),
            account_id: stage.account_id.clone(),
            region: stage.region.clone(),
            stage: scope.clone(),
            network,
            services: handles,
            edges,
        })
    }

    fn declare_network(
        &self,
        provisioner: &mut dyn Provisioner,
        scope: &ResourceHandle,
        stage: &StageDescriptor,
    ) -> PlanResult<NetworkHandle> {
        let stack_id = self.network_stack_id(&stage.label);
        let stack = provisioner.declare(
            Some(scope),
            &stack_id,
            Resource::Stack(StackSpec {
                name: stack_id.clone(),
                account: Some(stage.account_id.to_string()),
                region: Some(stage.region.clone()),
            }),
        )?;

        let name = self.network_name(&stage.label);
        let network = provisioner.declare(
            Some(&stack),
            &name,
            Resource::Network(NetworkSpec {
                name: name.clone(),
                max_azs: NETWORK_MAX_AZS,
                cidr: DEFAULT_NETWORK_CIDR.to_string(),
            }),
        )?;

        Ok(NetworkHandle {
            stack,
            network,
            cidr: DEFAULT_NETWORK_CIDR.to_string(),
        })
    }
}
