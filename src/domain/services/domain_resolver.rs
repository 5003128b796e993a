//! Domain resolver
//!
//! Maps a stage onto its child zone name under the root domain. Production
//! owns the canonical unsuffixed name; every other stage gets a hyphenated
//! suffix so several non-production stages can share one root domain.
//!
//! Certificates and DNS records match these names by exact string equality,
//! so the separators (`.` and `-`) are fixed.

use crate::domain::entities::{DomainPolicy, StageDescriptor};

/// Stage label reserved for production unless configured otherwise
pub const DEFAULT_PRODUCTION_LABEL: &str = "prod";

/// Child zone name plus whether delegating it crosses accounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDomain {
    pub child_zone_name: String,
    pub requires_cross_account_delegation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainResolver {
    production_label: String,
}

impl Default for DomainResolver {
    fn default() -> Self {
        Self::new(DEFAULT_PRODUCTION_LABEL)
    }
}

impl DomainResolver {
    pub fn new(production_label: impl Into<String>) -> Self {
        Self {
            production_label: production_label.into(),
        }
    }

    pub fn production_label(&self) -> &str {
        &self.production_label
    }

    pub fn is_production_stage(&self, stage_label: &str) -> bool {
        stage_label == self.production_label
    }

    /// `{base}.{root}` for production, `{base}-{stage}.{root}` otherwise.
    pub fn resolve(&self, stage_label: &str, root_domain: &str, base_subdomain: &str) -> String {
        if self.is_production_stage(stage_label) {
            format!("{}.{}", base_subdomain, root_domain)
        } else {
            format!("{}-{}.{}", base_subdomain, stage_label, root_domain)
        }
    }

    /// Resolve the child zone of `stage` under the policy's root zone.
    pub fn resolve_for(
        &self,
        stage: &StageDescriptor,
        policy: &DomainPolicy,
        base_subdomain: &str,
    ) -> ResolvedDomain {
        ResolvedDomain {
            child_zone_name: self.resolve(&stage.label, &policy.root_zone_name, base_subdomain),
            requires_cross_account_delegation: policy.requires_cross_account(&stage.account_id),
        }
    }
}
