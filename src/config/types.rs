//! Configuration type definitions

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    is_construct_name, ComputeType, DomainPolicy, RepoDescriptor, ServiceDescriptor,
    ServiceTemplate, StageDescriptor, ZoneSource,
};
use crate::domain::services::{DomainResolver, DEFAULT_PRODUCTION_LABEL};
use crate::domain::value_objects::{AccountId, ConfigWarning, Packaging};
use crate::error::{PlanError, PlanResult};

use super::loader;

/// Delivery pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name; defaults to `{service_prefix}Pipeline`
    #[serde(default)]
    pub name: Option<String>,

    /// Pipeline stack id; defaults to `{service_prefix}PipelineStack`
    #[serde(default)]
    pub stack_name: Option<String>,

    #[serde(default)]
    pub account: Option<AccountId>,

    #[serde(default)]
    pub region: Option<String>,

    /// Source control connection used by every source input
    #[serde(default)]
    pub connection_arn: String,

    /// The repository holding this deployment definition
    #[serde(default)]
    pub source: Option<RepoDescriptor>,

    #[serde(default = "default_synth_commands")]
    pub synth_commands: Vec<String>,

    #[serde(default = "default_true")]
    pub self_mutation: bool,

    /// Secret holding container registry credentials
    #[serde(default)]
    pub docker_credentials_secret_arn: Option<String>,

    /// Declare a bucket caching asset builds
    #[serde(default = "default_true")]
    pub asset_cache: bool,

    #[serde(default)]
    pub asset_compute_type: ComputeType,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: None,
            stack_name: None,
            account: None,
            region: None,
            connection_arn: String::new(),
            source: None,
            synth_commands: default_synth_commands(),
            self_mutation: true,
            docker_credentials_secret_arn: None,
            asset_cache: true,
            asset_compute_type: ComputeType::default(),
        }
    }
}

fn default_synth_commands() -> Vec<String> {
    ["npm ci", "npm run build", "npx cdk synth"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_true() -> bool {
    true
}

/// Root zone policy plus the production stage label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    #[serde(default = "default_production_label")]
    pub production_label: String,

    pub root_zone: DomainPolicy,
}

fn default_production_label() -> String {
    DEFAULT_PRODUCTION_LABEL.to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Prefix of every construct id, e.g. `MacroSurfer`
    pub service_prefix: String,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub repositories: Vec<RepoDescriptor>,

    /// Stage registry; order is pipeline order
    #[serde(default)]
    pub stages: Vec<StageDescriptor>,

    pub domain: DomainConfig,

    #[serde(default)]
    pub services: Vec<ServiceTemplate>,

    #[serde(default)]
    pub packaging: Packaging,
}

impl DeploymentConfig {
    /// Load configuration from a TOML or YAML file
    pub fn load(path: &Path) -> PlanResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PlanResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (STACKPLAN_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn pipeline_name(&self) -> String {
        self.pipeline
            .name
            .clone()
            .unwrap_or_else(|| format!("{}Pipeline", self.service_prefix))
    }

    pub fn pipeline_stack_name(&self) -> String {
        self.pipeline
            .stack_name
            .clone()
            .unwrap_or_else(|| format!("{}PipelineStack", self.service_prefix))
    }

    pub fn resolver(&self) -> DomainResolver {
        DomainResolver::new(self.domain.production_label.clone())
    }

    /// Service descriptors for one stage, production overrides applied
    pub fn services_for(&self, stage: &StageDescriptor) -> PlanResult<Vec<ServiceDescriptor>> {
        let is_production = self.resolver().is_production_stage(&stage.label);
        self.services
            .iter()
            .map(|template| {
                template.instantiate(&self.service_prefix, is_production, &self.repositories)
            })
            .collect()
    }

    /// Every configuration check, run before the first declaration.
    pub fn validate(&self) -> PlanResult<()> {
        if self.service_prefix.trim().is_empty() {
            return Err(missing("service_prefix", "configuration"));
        }
        check_construct_name("service_prefix", &self.service_prefix)?;
        self.validate_pipeline()?;

        let mut repo_names = HashSet::new();
        for repo in &self.repositories {
            repo.validate()?;
            if !repo_names.insert(repo.name.as_str()) {
                return Err(PlanError::DuplicateRepository {
                    name: repo.name.clone(),
                });
            }
        }

        if self.stages.is_empty() {
            return Err(PlanError::NoStages);
        }
        let mut labels = HashSet::new();
        for stage in &self.stages {
            stage.validate()?;
            if !labels.insert(stage.label.as_str()) {
                return Err(PlanError::DuplicateStage {
                    label: stage.label.clone(),
                });
            }
        }

        if self.domain.production_label.trim().is_empty() {
            return Err(missing("production_label", "[domain]"));
        }
        self.domain.root_zone.validate()?;

        if self.services.is_empty() {
            return Err(missing("services", "configuration"));
        }
        let mut service_names = HashSet::new();
        for service in &self.services {
            if !service_names.insert(service.name.as_str()) {
                return Err(PlanError::DuplicateService {
                    name: service.name.clone(),
                });
            }
        }
        // Instantiation validates sizing, zone options and repository refs.
        // Child zones are unique across the whole plan, not just per stage.
        let resolver = self.resolver();
        let mut zone_owners: HashMap<String, String> = HashMap::new();
        for stage in &self.stages {
            for descriptor in self.services_for(stage)? {
                let ZoneSource::Delegated { base_subdomain } = &descriptor.zone else {
                    continue;
                };
                let zone_name = resolver
                    .resolve(&stage.label, &self.domain.root_zone.root_zone_name, base_subdomain)
                    .to_ascii_lowercase();
                let owner = format!("{} ({})", descriptor.service_name, stage.label);
                if let Some(first) = zone_owners.get(&zone_name) {
                    return Err(PlanError::ZoneCollision {
                        zone_name,
                        first: first.clone(),
                        second: owner,
                    });
                }
                zone_owners.insert(zone_name, owner);
            }
        }

        Ok(())
    }

    fn validate_pipeline(&self) -> PlanResult<()> {
        if let Some(stack_name) = &self.pipeline.stack_name {
            check_construct_name("pipeline.stack_name", stack_name)?;
        }
        if self.pipeline.connection_arn.trim().is_empty() {
            return Err(missing("connection_arn", "[pipeline]"));
        }
        let source = self
            .pipeline
            .source
            .as_ref()
            .ok_or_else(|| missing("source", "[pipeline]"))?;
        source.validate()?;
        if self.pipeline.synth_commands.is_empty() {
            return Err(missing("synth_commands", "[pipeline]"));
        }
        if self.pipeline.region.is_some() != self.pipeline.account.is_some() {
            return Err(missing(
                if self.pipeline.account.is_some() {
                    "region"
                } else {
                    "account"
                },
                "[pipeline]",
            ));
        }
        if self.repositories.iter().any(|r| r.name == source.name) {
            return Err(PlanError::DuplicateRepository {
                name: source.name.clone(),
            });
        }
        Ok(())
    }
}

fn check_construct_name(field: &str, value: &str) -> PlanResult<()> {
    if is_construct_name(value) {
        Ok(())
    } else {
        Err(PlanError::InvalidIdentifier {
            field: field.to_string(),
            value: value.to_string(),
        })
    }
}

fn missing(field: &str, context: &str) -> PlanError {
    PlanError::MissingField {
        field: field.to_string(),
        context: context.to_string(),
    }
}
