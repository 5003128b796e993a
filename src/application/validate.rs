//! Validate Use Case
//!
//! Runs every configuration check without declaring anything and reports
//! the zone each service would be published under, per stage.

use crate::config::{ConfigWarning, DeploymentConfig};
use crate::domain::entities::ZoneSource;
use crate::error::PlanResult;

/// One stage as it would be composed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSummary {
    pub label: String,
    pub production: bool,
    /// `(service name, domain name)`
    pub services: Vec<(String, String)>,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub stages: Vec<StageSummary>,
    pub warnings: Vec<ConfigWarning>,
}

impl ValidationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

pub struct ValidateUseCase;

impl ValidateUseCase {
    pub fn execute(
        config: &DeploymentConfig,
        warnings: Vec<ConfigWarning>,
    ) -> PlanResult<ValidationReport> {
        config.validate()?;
        let resolver = config.resolver();
        let root = config.domain.root_zone.root_zone_name.as_str();

        let mut stages = Vec::with_capacity(config.stages.len());
        for stage in &config.stages {
            let services = config
                .services_for(stage)?
                .into_iter()
                .map(|descriptor| {
                    let domain = match &descriptor.zone {
                        ZoneSource::Delegated { base_subdomain } => {
                            resolver.resolve(&stage.label, root, base_subdomain)
                        }
                        ZoneSource::Preset(preset) => preset.hosted_zone_name.clone(),
                    };
                    (descriptor.service_name, domain)
                })
                .collect();

            stages.push(StageSummary {
                label: stage.label.clone(),
                production: resolver.is_production_stage(&stage.label),
                services,
            });
        }

        Ok(ValidationReport { stages, warnings })
    }
}
