//! Pipeline graph
//!
//! Turns a validated deployment configuration into the pipeline stack: source
//! inputs, the synth step, and one pipeline stage per registry entry in
//! registry order. Each pipeline stage is composed by the `StageComposer`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::DeploymentConfig;
use crate::domain::entities::{
    DockerCredential, PipelineSpec, PipelineStageSpec, Resource, ServiceDescriptor, StackSpec,
    StageDescriptor, SynthStep,
};
use crate::domain::ports::{Provisioner, ResourceHandle, SourceConnector, SourceInput};
use crate::error::{PlanError, PlanResult};

use super::StageComposer;
use super::StageNode;

/// Registry name for Docker Hub credentials
pub const DOCKER_HUB_REGISTRY: &str = "docker_hub";

/// Logical id of the asset build cache bucket
pub const CACHE_BUCKET_ID: &str = "CodeBuildCacheBucket";

/// The declared pipeline and everything hanging off it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineOutline {
    pub stack: ResourceHandle,
    pub pipeline: ResourceHandle,
    pub cache_bucket: Option<ResourceHandle>,
    pub synth_input: SourceInput,
    pub additional_inputs: BTreeMap<String, SourceInput>,
    pub stages: Vec<StageNode>,
}

impl PipelineOutline {
    pub fn stage_labels(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.label.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineGraph<'a> {
    config: &'a DeploymentConfig,
}

impl<'a> PipelineGraph<'a> {
    pub fn new(config: &'a DeploymentConfig) -> Self {
        Self { config }
    }

    /// Build the whole deployment.
    ///
    /// Configuration is validated and every stage's service descriptors are
    /// instantiated before the first declaration, so a configuration error
    /// never leaves a partial plan behind.
    pub fn build(
        &self,
        provisioner: &mut dyn Provisioner,
        connector: &mut dyn SourceConnector,
    ) -> PlanResult<PipelineOutline> {
        let config = self.config;
        config.validate()?;

        let source = config
            .pipeline
            .source
            .as_ref()
            .ok_or_else(|| PlanError::MissingField {
                field: "source".to_string(),
                context: "[pipeline]".to_string(),
            })?;
        let stages = config
            .stages
            .iter()
            .map(|stage| Ok((stage, config.services_for(stage)?)))
            .collect::<PlanResult<Vec<(&StageDescriptor, Vec<ServiceDescriptor>)>>>()?;

        let connection_arn = config.pipeline.connection_arn.as_str();
        let synth_input = connector.connect(source, connection_arn)?;
        let mut additional_inputs = BTreeMap::new();
        for repo in &config.repositories {
            additional_inputs.insert(repo.name.clone(), connector.connect(repo, connection_arn)?);
        }

        let stack_name = config.pipeline_stack_name();
        let stack = provisioner.declare(
            None,
            &stack_name,
            Resource::Stack(StackSpec {
                name: stack_name.clone(),
                account: config.pipeline.account.as_ref().map(|a| a.to_string()),
                region: config.pipeline.region.clone(),
            }),
        )?;

        let cache_bucket = if config.pipeline.asset_cache {
            Some(provisioner.declare(Some(&stack), CACHE_BUCKET_ID, Resource::CacheBucket)?)
        } else {
            None
        };

        let docker_credentials = config
            .pipeline
            .docker_credentials_secret_arn
            .iter()
            .map(|secret_arn| DockerCredential {
                registry: DOCKER_HUB_REGISTRY.to_string(),
                secret_arn: secret_arn.clone(),
            })
            .collect();

        let pipeline = provisioner.declare(
            Some(&stack),
            "Pipeline",
            Resource::Pipeline(PipelineSpec {
                name: config.pipeline_name(),
                synth: SynthStep {
                    name: "Synth".to_string(),
                    input: synth_input.clone(),
                    commands: config.pipeline.synth_commands.clone(),
                    additional_inputs: additional_inputs.clone(),
                },
                self_mutation: config.pipeline.self_mutation,
                docker_credentials,
                asset_cache: cache_bucket.clone(),
                asset_compute_type: config.pipeline.asset_compute_type,
            }),
        )?;

        let resolver = config.resolver();
        let composer = StageComposer::new(
            &config.service_prefix,
            &resolver,
            &config.domain.root_zone,
            &config.packaging,
        );

        let mut nodes = Vec::with_capacity(stages.len());
        let mut previous: Option<ResourceHandle> = None;
        for (position, (stage, services)) in stages.iter().enumerate() {
            let stage_handle = provisioner.declare(
                Some(&stack),
                &format!("Stage{}", stage.label),
                Resource::PipelineStage(PipelineStageSpec {
                    label: stage.label.clone(),
                    account: stage.account_id.to_string(),
                    region: stage.region.clone(),
                    position,
                }),
            )?;
            if let Some(previous) = &previous {
                provisioner.add_dependency(&stage_handle, previous)?;
            }

            nodes.push(composer.compose(provisioner, &stage_handle, stage, services)?);
            previous = Some(stage_handle);
        }

        tracing::info!(
            pipeline = %config.pipeline_name(),
            stages = nodes.len(),
            inputs = additional_inputs.len() + 1,
            "built pipeline graph"
        );

        Ok(PipelineOutline {
            stack,
            pipeline,
            cache_bucket,
            synth_input,
            additional_inputs,
            stages: nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        ComputeType, DelegationKind, HostedZone, PresetHostedZoneAndCertificate,
    };
    use crate::domain::ports::ProvisionError;
    use crate::infrastructure::provisioner::InMemoryProvisioner;
    use crate::infrastructure::sources::ConnectionSourceConnector;

    const SAMPLE: &str = include_str!("../../../demos/macrosurfer.toml");

    fn sample() -> DeploymentConfig {
        toml::from_str(SAMPLE).unwrap()
    }

    fn build(
        config: &DeploymentConfig,
        provisioner: &mut InMemoryProvisioner,
    ) -> PlanResult<PipelineOutline> {
        PipelineGraph::new(config).build(provisioner, &mut ConnectionSourceConnector)
    }

    #[test]
    fn one_pipeline_stage_per_registry_entry_in_order() {
        let config = sample();
        let mut provisioner = InMemoryProvisioner::new();
        let outline = build(&config, &mut provisioner).unwrap();

        assert_eq!(outline.stage_labels(), vec!["beta", "prod"]);

        let plan = provisioner.into_plan();
        let stages: Vec<_> = plan
            .of_kind("pipeline_stage")
            .map(|r| match &r.resource {
                Resource::PipelineStage(spec) => (spec.label.clone(), spec.position),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(
            stages,
            vec![("beta".to_string(), 0), ("prod".to_string(), 1)]
        );
        assert!(plan.depends_on(&outline.stages[1].stage, &outline.stages[0].stage));
    }

    #[test]
    fn synth_step_uses_pipeline_source_and_named_additional_inputs() {
        let config = sample();
        let mut provisioner = InMemoryProvisioner::new();
        let outline = build(&config, &mut provisioner).unwrap();

        assert_eq!(outline.synth_input.repository, "YingjingLu/MacroSurferCDK");
        assert_eq!(
            outline.additional_inputs.keys().collect::<Vec<_>>(),
            vec!["MacroSurferLambda", "MacroSurferService"]
        );

        let plan = provisioner.into_plan();
        match plan.get(outline.pipeline.id()) {
            Some(Resource::Pipeline(spec)) => {
                assert_eq!(spec.name, "MacroSurferPipeline");
                assert_eq!(
                    spec.synth.commands,
                    vec!["npm ci", "npm run build", "npx cdk synth"]
                );
                assert!(spec.self_mutation);
                assert_eq!(spec.docker_credentials.len(), 1);
                assert_eq!(spec.docker_credentials[0].registry, "docker_hub");
                assert_eq!(spec.asset_cache, outline.cache_bucket);
                assert_eq!(spec.asset_compute_type, ComputeType::Medium);
            }
            other => panic!("expected pipeline, got {:?}", other),
        }
    }

    #[test]
    fn pipeline_stack_carries_configured_environment() {
        let config = sample();
        let mut provisioner = InMemoryProvisioner::new();
        let outline = build(&config, &mut provisioner).unwrap();
        let plan = provisioner.into_plan();

        assert_eq!(outline.stack.id(), "MacroSurferPipelineStack");
        match plan.get(outline.stack.id()) {
            Some(Resource::Stack(spec)) => {
                assert_eq!(spec.account.as_deref(), Some("372183484622"));
                assert_eq!(spec.region.as_deref(), Some("us-west-2"));
            }
            other => panic!("expected stack, got {:?}", other),
        }
    }

    #[test]
    fn delegation_path_follows_stage_account() {
        let config = sample();
        let mut provisioner = InMemoryProvisioner::new();
        let outline = build(&config, &mut provisioner).unwrap();

        let beta = &outline.stages[0].services[0];
        let prod = &outline.stages[1].services[0];

        assert_eq!(beta.domain_name, "service-beta.macrosurfer.com");
        assert_eq!(prod.domain_name, "service.macrosurfer.com");
        assert_eq!(
            beta.zone.delegation(),
            Some(&DelegationKind::CrossAccount {
                role_arn: "arn:aws:iam::372183484622:role/MacroSurferHostedZoneDelegationRole"
                    .to_string()
            })
        );
        assert!(matches!(
            prod.zone.delegation(),
            Some(DelegationKind::SameAccount { .. })
        ));

        let plan = provisioner.into_plan();
        assert_eq!(plan.count_of("cross_account_delegation_record"), 1);
        assert_eq!(plan.count_of("zone_delegation_record"), 1);
    }

    #[test]
    fn preset_zone_skips_delegation_in_every_stage() {
        let mut config = sample();
        config.services[0].subdomain = None;
        config.services[0].preset = Some(PresetHostedZoneAndCertificate {
            hosted_zone_id: "Z09PRESET".to_string(),
            hosted_zone_name: "api.macrosurfer.com".to_string(),
            certificate_arn: "arn:aws:acm:us-west-2:372183484622:certificate/9f1e".to_string(),
        });
        let mut provisioner = InMemoryProvisioner::new();
        let outline = build(&config, &mut provisioner).unwrap();

        for stage in &outline.stages {
            let service = &stage.services[0];
            assert!(service.zone.is_preset());
            assert_eq!(service.zone.zone_name(), "api.macrosurfer.com");
        }

        let plan = provisioner.into_plan();
        assert_eq!(plan.count_of("hosted_zone"), 0);
        assert_eq!(plan.count_of("zone_delegation_record"), 0);
        assert_eq!(plan.count_of("cross_account_delegation_record"), 0);
        assert_eq!(plan.count_of("role_import"), 0);
        assert_eq!(plan.count_of("hosted_zone_import"), 2);
    }

    #[test]
    fn configuration_error_declares_nothing() {
        let mut config = sample();
        config.services[0].cpu = 0;
        let mut provisioner = InMemoryProvisioner::new();

        let err = build(&config, &mut provisioner).unwrap_err();
        assert!(err.is_configuration());
        assert!(provisioner.into_plan().is_empty());
    }

    #[test]
    fn connector_rejection_surfaces_verbatim() {
        let mut config = sample();
        config.pipeline.connection_arn = "connection-1".to_string();
        let mut provisioner = InMemoryProvisioner::new();

        let err = build(&config, &mut provisioner).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Provision(ProvisionError::Rejected { .. })
        ));
        assert!(provisioner.into_plan().is_empty());
    }

    #[test]
    fn colliding_subdomains_fail_before_any_declaration() {
        let mut config = sample();
        let mut second = config.services[0].clone();
        second.name = "MacroSurferWorker".to_string();
        config.services.push(second);
        let mut provisioner = InMemoryProvisioner::new();

        let err = build(&config, &mut provisioner).unwrap_err();
        assert!(matches!(err, PlanError::ZoneCollision { .. }));
        assert!(provisioner.into_plan().is_empty());
    }

    #[test]
    fn invalid_service_name_fails_before_any_declaration() {
        let mut config = sample();
        config.services[0].name = "Api/v2".to_string();
        let mut provisioner = InMemoryProvisioner::new();

        let err = build(&config, &mut provisioner).unwrap_err();
        assert!(err.is_configuration());
        assert!(provisioner.into_plan().is_empty());
    }

    #[test]
    fn zone_taken_outside_the_plan_surfaces_provider_conflict() {
        let config = sample();
        let mut provisioner =
            InMemoryProvisioner::new().with_existing_zone("service.macrosurfer.com");

        let err = build(&config, &mut provisioner).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Provision(ProvisionError::ZoneNameConflict { zone_name, .. })
                if zone_name == "service.macrosurfer.com"
        ));
    }

    #[test]
    fn disabled_asset_cache_declares_no_bucket() {
        let mut config = sample();
        config.pipeline.asset_cache = false;
        let mut provisioner = InMemoryProvisioner::new();

        let outline = build(&config, &mut provisioner).unwrap();
        assert!(outline.cache_bucket.is_none());
        assert_eq!(provisioner.into_plan().count_of("cache_bucket"), 0);
    }
}
