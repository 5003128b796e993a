//! Synth Use Case
//!
//! Orchestrates one plan construction:
//! 1. Validate the configuration
//! 2. Connect source inputs
//! 3. Declare the pipeline, its stages and every service topology
//!
//! Any error aborts construction and no outline is returned.

use crate::config::DeploymentConfig;
use crate::domain::entities::ProvisioningPlan;
use crate::domain::ports::{Provisioner, SourceConnector};
use crate::domain::services::{PipelineGraph, PipelineOutline};
use crate::domain::value_objects::PlanDigest;
use crate::error::PlanResult;
use crate::infrastructure::{ConnectionSourceConnector, InMemoryProvisioner};

/// Synth use case, parameterized by its ports
pub struct SynthUseCase<P, C>
where
    P: Provisioner,
    C: SourceConnector,
{
    provisioner: P,
    connector: C,
}

impl<P, C> SynthUseCase<P, C>
where
    P: Provisioner,
    C: SourceConnector,
{
    pub fn new(provisioner: P, connector: C) -> Self {
        Self {
            provisioner,
            connector,
        }
    }

    pub fn execute(&mut self, config: &DeploymentConfig) -> PlanResult<PipelineOutline> {
        tracing::debug!(
            prefix = %config.service_prefix,
            stages = config.stages.len(),
            services = config.services.len(),
            "synthesizing deployment"
        );
        PipelineGraph::new(config).build(&mut self.provisioner, &mut self.connector)
    }

    pub fn provisioner(&self) -> &P {
        &self.provisioner
    }

    pub fn into_provisioner(self) -> P {
        self.provisioner
    }
}

/// A recorded plan with its outline and fingerprint
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub outline: PipelineOutline,
    pub plan: ProvisioningPlan,
    pub digest: PlanDigest,
}

/// Build the plan with the recording provisioner.
pub fn synthesize(config: &DeploymentConfig) -> PlanResult<Synthesis> {
    let mut use_case = SynthUseCase::new(InMemoryProvisioner::new(), ConnectionSourceConnector);
    let outline = use_case.execute(config)?;
    let plan = use_case.into_provisioner().into_plan();
    let digest = plan.digest()?;

    tracing::info!(
        resources = plan.len(),
        dependencies = plan.dependencies.len(),
        digest = %digest.short(),
        "plan recorded"
    );

    Ok(Synthesis {
        outline,
        plan,
        digest,
    })
}
