//! Zone bindings
//!
//! A service is bound either to a zone delegated by this deployment or to a
//! preset zone supplied by configuration. Downstream code only needs the
//! `HostedZone` capability and never inspects which one it got.

use std::fmt;

use serde::Serialize;

use crate::domain::ports::ResourceHandle;

/// Common capability of every zone a service can publish records into
pub trait HostedZone {
    fn zone_handle(&self) -> &ResourceHandle;
    fn zone_name(&self) -> &str;
}

/// Which delegation path was taken for a child zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DelegationKind {
    /// NS record written directly into the parent zone
    SameAccount { parent_zone: ResourceHandle },
    /// NS record written through a role assumed in the parent's account
    CrossAccount { role_arn: String },
}

impl DelegationKind {
    pub fn is_cross_account(&self) -> bool {
        matches!(self, DelegationKind::CrossAccount { .. })
    }
}

impl fmt::Display for DelegationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelegationKind::SameAccount { .. } => write!(f, "same-account"),
            DelegationKind::CrossAccount { .. } => write!(f, "cross-account"),
        }
    }
}

/// A child zone created by this deployment and delegated from the root zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelegatedZone {
    pub zone: ResourceHandle,
    pub zone_name: String,
    pub delegation: DelegationKind,
    pub delegation_record: ResourceHandle,
}

impl HostedZone for DelegatedZone {
    fn zone_handle(&self) -> &ResourceHandle {
        &self.zone
    }

    fn zone_name(&self) -> &str {
        &self.zone_name
    }
}

/// A pre-registered zone and certificate referenced by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetZone {
    pub zone: ResourceHandle,
    pub hosted_zone_id: String,
    pub zone_name: String,
    pub certificate_arn: String,
}

impl HostedZone for PresetZone {
    fn zone_handle(&self) -> &ResourceHandle {
        &self.zone
    }

    fn zone_name(&self) -> &str {
        &self.zone_name
    }
}

/// The zone a service is bound to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "binding", rename_all = "snake_case")]
pub enum ZoneBinding {
    Delegated(DelegatedZone),
    Preset(PresetZone),
}

impl ZoneBinding {
    pub fn is_preset(&self) -> bool {
        matches!(self, ZoneBinding::Preset(_))
    }

    /// Delegation path, if this zone was delegated
    pub fn delegation(&self) -> Option<&DelegationKind> {
        match self {
            ZoneBinding::Delegated(zone) => Some(&zone.delegation),
            ZoneBinding::Preset(_) => None,
        }
    }
}

impl HostedZone for ZoneBinding {
    fn zone_handle(&self) -> &ResourceHandle {
        match self {
            ZoneBinding::Delegated(zone) => zone.zone_handle(),
            ZoneBinding::Preset(zone) => zone.zone_handle(),
        }
    }

    fn zone_name(&self) -> &str {
        match self {
            ZoneBinding::Delegated(zone) => zone.zone_name(),
            ZoneBinding::Preset(zone) => zone.zone_name(),
        }
    }
}
