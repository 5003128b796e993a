//! Service descriptors
//!
//! A `ServiceTemplate` is what configuration declares once; a
//! `ServiceDescriptor` is the template instantiated for one stage.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

use super::{is_construct_name, is_dns_label, RepoDescriptor};

/// A pre-registered zone and certificate that must not be re-delegated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetHostedZoneAndCertificate {
    pub hosted_zone_id: String,
    pub hosted_zone_name: String,
    pub certificate_arn: String,
}

/// Where a service's DNS zone and certificate come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ZoneSource {
    /// Child zone derived from the stage and delegated from the root zone
    Delegated { base_subdomain: String },
    /// Zone and certificate supplied by configuration
    Preset(PresetHostedZoneAndCertificate),
}

impl ZoneSource {
    pub fn preset(&self) -> Option<&PresetHostedZoneAndCertificate> {
        match self {
            ZoneSource::Preset(preset) => Some(preset),
            ZoneSource::Delegated { .. } => None,
        }
    }
}

/// One deployable workload in one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    pub service_prefix: String,
    pub service_name: String,
    pub health_check_path: String,
    pub cpu: u32,
    pub memory: u32,
    pub min_capacity: u32,
    pub max_capacity: u32,
    pub dockerfile_name: String,
    pub package_path: String,
    pub port: u16,
    pub zone: ZoneSource,
}

impl ServiceDescriptor {
    /// Reject unsatisfiable descriptors before anything is declared.
    pub fn validate(&self) -> PlanResult<()> {
        let context = format!("service '{}'", self.service_name);
        for (field, value) in [
            ("service_prefix", &self.service_prefix),
            ("service_name", &self.service_name),
            ("health_check_path", &self.health_check_path),
            ("dockerfile", &self.dockerfile_name),
            ("package_path", &self.package_path),
        ] {
            if value.trim().is_empty() {
                return Err(PlanError::MissingField {
                    field: field.to_string(),
                    context,
                });
            }
        }

        for (field, value) in [
            ("service_prefix", &self.service_prefix),
            ("service name", &self.service_name),
        ] {
            if !is_construct_name(value) {
                return Err(PlanError::InvalidIdentifier {
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }

        let invalid = |reason: String| PlanError::InvalidService {
            service: self.service_name.clone(),
            reason,
        };
        if self.cpu == 0 {
            return Err(invalid("cpu must be positive".to_string()));
        }
        if self.memory == 0 {
            return Err(invalid("memory must be positive".to_string()));
        }
        if self.port == 0 {
            return Err(invalid("port must be positive".to_string()));
        }
        if self.min_capacity == 0 {
            return Err(invalid("min_capacity must be positive".to_string()));
        }
        if self.max_capacity < self.min_capacity {
            return Err(invalid(format!(
                "max_capacity ({}) is less than min_capacity ({})",
                self.max_capacity, self.min_capacity
            )));
        }
        if !self.health_check_path.starts_with('/') {
            return Err(invalid(format!(
                "health_check_path '{}' must start with '/'",
                self.health_check_path
            )));
        }

        match &self.zone {
            ZoneSource::Delegated { base_subdomain } if base_subdomain.trim().is_empty() => {
                Err(PlanError::MissingField {
                    field: "subdomain".to_string(),
                    context,
                })
            }
            ZoneSource::Preset(preset) => {
                for (field, value) in [
                    ("preset.hosted_zone_id", &preset.hosted_zone_id),
                    ("preset.hosted_zone_name", &preset.hosted_zone_name),
                    ("preset.certificate_arn", &preset.certificate_arn),
                ] {
                    if value.trim().is_empty() {
                        return Err(PlanError::MissingField {
                            field: field.to_string(),
                            context,
                        });
                    }
                }
                Ok(())
            }
            ZoneSource::Delegated { base_subdomain } if !is_dns_label(base_subdomain) => {
                Err(invalid(format!(
                    "subdomain '{}' must be a single DNS label (letters, digits, inner '-')",
                    base_subdomain
                )))
            }
            ZoneSource::Delegated { .. } => Ok(()),
        }
    }
}

/// Overrides applied to every stage except production
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NonProductionOverrides {
    #[serde(default)]
    pub dockerfile: Option<String>,
    #[serde(default)]
    pub min_capacity: Option<u32>,
    #[serde(default)]
    pub max_capacity: Option<u32>,
}

/// Service as declared in configuration, before stage instantiation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTemplate {
    pub name: String,

    /// Base subdomain for delegated zones (e.g. `service`)
    #[serde(default)]
    pub subdomain: Option<String>,

    /// Pre-registered zone and certificate; excludes `subdomain`
    #[serde(default)]
    pub preset: Option<PresetHostedZoneAndCertificate>,

    pub health_check_path: String,
    pub cpu: u32,
    pub memory: u32,

    #[serde(default = "default_capacity")]
    pub min_capacity: u32,

    #[serde(default = "default_capacity")]
    pub max_capacity: u32,

    #[serde(default = "default_dockerfile")]
    pub dockerfile: String,

    /// Name of the repository whose checkout is the build context
    pub package_repo: String,

    pub port: u16,

    #[serde(default)]
    pub non_production: NonProductionOverrides,
}

fn default_capacity() -> u32 {
    1
}

fn default_dockerfile() -> String {
    "Dockerfile".to_string()
}

impl ServiceTemplate {
    /// Zone source, enforcing that exactly one of `subdomain`/`preset` is set.
    pub fn zone_source(&self) -> PlanResult<ZoneSource> {
        match (&self.subdomain, &self.preset) {
            (Some(_), Some(_)) => Err(PlanError::ConflictingOptions {
                context: format!("service '{}'", self.name),
                first: "subdomain".to_string(),
                second: "preset".to_string(),
            }),
            (Some(base), None) => Ok(ZoneSource::Delegated {
                base_subdomain: base.clone(),
            }),
            (None, Some(preset)) => Ok(ZoneSource::Preset(preset.clone())),
            (None, None) => Err(PlanError::MissingField {
                field: "subdomain or preset".to_string(),
                context: format!("service '{}'", self.name),
            }),
        }
    }

    /// Instantiate this template for one stage.
    pub fn instantiate(
        &self,
        service_prefix: &str,
        is_production: bool,
        repositories: &[RepoDescriptor],
    ) -> PlanResult<ServiceDescriptor> {
        let zone = self.zone_source()?;

        let repo = repositories
            .iter()
            .find(|r| r.name == self.package_repo)
            .ok_or_else(|| PlanError::UnknownRepository {
                name: self.package_repo.clone(),
                service: self.name.clone(),
            })?;

        let overrides = if is_production {
            NonProductionOverrides::default()
        } else {
            self.non_production.clone()
        };

        let descriptor = ServiceDescriptor {
            service_prefix: service_prefix.to_string(),
            service_name: self.name.clone(),
            health_check_path: self.health_check_path.clone(),
            cpu: self.cpu,
            memory: self.memory,
            min_capacity: overrides.min_capacity.unwrap_or(self.min_capacity),
            max_capacity: overrides.max_capacity.unwrap_or(self.max_capacity),
            dockerfile_name: overrides.dockerfile.unwrap_or_else(|| self.dockerfile.clone()),
            package_path: repo.name.clone(),
            port: self.port,
            zone,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repos() -> Vec<RepoDescriptor> {
        vec![
            RepoDescriptor::new("YingjingLu/MacroSurferLambda", "main", "MacroSurferLambda"),
            RepoDescriptor::new("YingjingLu/MacroSurferService", "main", "MacroSurferService"),
        ]
    }

    fn template() -> ServiceTemplate {
        ServiceTemplate {
            name: "MacroSurferBackend".to_string(),
            subdomain: Some("service".to_string()),
            preset: None,
            health_check_path: "/health/ping".to_string(),
            cpu: 512,
            memory: 2048,
            min_capacity: 1,
            max_capacity: 1,
            dockerfile: "Dockerfile.prod".to_string(),
            package_repo: "MacroSurferService".to_string(),
            port: 8000,
            non_production: NonProductionOverrides {
                dockerfile: Some("Dockerfile.devo".to_string()),
                ..Default::default()
            },
        }
    }

    fn preset() -> PresetHostedZoneAndCertificate {
        PresetHostedZoneAndCertificate {
            hosted_zone_id: "Z999".to_string(),
            hosted_zone_name: "macrosurfer.com".to_string(),
            certificate_arn: "arn:aws:acm:us-west-2:372183484622:certificate/abc".to_string(),
        }
    }

    #[test]
    fn production_uses_base_dockerfile() {
        let d = template().instantiate("MacroSurfer", true, &repos()).unwrap();
        assert_eq!(d.dockerfile_name, "Dockerfile.prod");
        assert_eq!(d.package_path, "MacroSurferService");
        assert_eq!(
            d.zone,
            ZoneSource::Delegated {
                base_subdomain: "service".to_string()
            }
        );
    }

    #[test]
    fn non_production_applies_overrides() {
        let mut t = template();
        t.non_production.max_capacity = Some(2);
        let d = t.instantiate("MacroSurfer", false, &repos()).unwrap();
        assert_eq!(d.dockerfile_name, "Dockerfile.devo");
        assert_eq!(d.min_capacity, 1);
        assert_eq!(d.max_capacity, 2);
    }

    #[test]
    fn subdomain_and_preset_are_mutually_exclusive() {
        let mut t = template();
        t.preset = Some(preset());
        assert!(matches!(
            t.instantiate("MacroSurfer", true, &repos()),
            Err(PlanError::ConflictingOptions { .. })
        ));
    }

    #[test]
    fn zone_source_is_required() {
        let mut t = template();
        t.subdomain = None;
        assert!(matches!(
            t.zone_source(),
            Err(PlanError::MissingField { .. })
        ));
    }

    #[test]
    fn preset_only_template_yields_preset_zone() {
        let mut t = template();
        t.subdomain = None;
        t.preset = Some(preset());
        let d = t.instantiate("MacroSurfer", true, &repos()).unwrap();
        assert_eq!(d.zone.preset(), Some(&preset()));
    }

    #[test]
    fn unknown_repository_is_rejected() {
        let mut t = template();
        t.package_repo = "Nope".to_string();
        assert!(matches!(
            t.instantiate("MacroSurfer", true, &repos()),
            Err(PlanError::UnknownRepository { .. })
        ));
    }

    #[test]
    fn max_below_min_is_rejected() {
        let mut t = template();
        t.min_capacity = 3;
        t.max_capacity = 2;
        assert!(matches!(
            t.instantiate("MacroSurfer", true, &repos()),
            Err(PlanError::InvalidService { .. })
        ));
    }

    #[test]
    fn name_with_separator_is_rejected() {
        let mut t = template();
        t.name = "Backend/v2".to_string();
        assert!(matches!(
            t.instantiate("MacroSurfer", true, &repos()),
            Err(PlanError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn dotted_subdomain_is_rejected() {
        let mut t = template();
        t.subdomain = Some("api.v2".to_string());
        assert!(matches!(
            t.instantiate("MacroSurfer", true, &repos()),
            Err(PlanError::InvalidService { .. })
        ));
    }

    #[test]
    fn zero_cpu_memory_or_port_is_rejected() {
        let base = template().instantiate("MacroSurfer", true, &repos()).unwrap();

        let mut d = base.clone();
        d.cpu = 0;
        assert!(d.validate().is_err());

        let mut d = base.clone();
        d.memory = 0;
        assert!(d.validate().is_err());

        let mut d = base;
        d.port = 0;
        assert!(d.validate().is_err());
    }
}
