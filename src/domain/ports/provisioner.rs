//! Provisioner port - abstraction over the infrastructure provisioning provider
//!
//! The core only declares typed resources and dependency edges. Creating the
//! resources, DNS propagation and certificate issuance all happen on the
//! provider's side.

use std::fmt;

use serde::Serialize;

use crate::domain::entities::Resource;

/// Result type for provisioning operations
pub type ProvisionResult<T> = Result<T, ProvisionError>;

/// Provider-reported failures. Surfaced verbatim, never retried here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisionError {
    #[error("resource '{id}' is already declared")]
    DuplicateLogicalId { id: String },

    #[error("hosted zone '{zone_name}' already exists (owned by {owner})")]
    ZoneNameConflict { zone_name: String, owner: String },

    #[error("unknown resource handle '{id}'")]
    UnknownHandle { id: String },

    #[error("dependency '{dependent}' -> '{dependency}' would create a cycle")]
    DependencyCycle {
        dependent: String,
        dependency: String,
    },

    #[error("{resource} rejected: {reason}")]
    Rejected { resource: String, reason: String },
}

/// Opaque handle to a declared resource.
///
/// The id is the slash-separated construct path, e.g.
/// `PipelineStack/Stageprod/SurferBackend-prod/SurferCluster`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceHandle(String);

impl ResourceHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Handle for `logical_id` under an optional parent
    pub fn child_of(parent: Option<&ResourceHandle>, logical_id: &str) -> Self {
        match parent {
            Some(parent) => Self(format!("{}/{}", parent.0, logical_id)),
            None => Self(logical_id.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    /// Last path segment
    pub fn logical_id(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// True if `self` is nested (at any depth) under `ancestor`
    pub fn is_within(&self, ancestor: &ResourceHandle) -> bool {
        self.0
            .strip_prefix(ancestor.id())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Abstract provisioning provider
///
/// Implementations:
/// - `InMemoryProvisioner` - records declarations into a `ProvisioningPlan`
pub trait Provisioner {
    /// Declare a resource under `parent` (top-level when `None`)
    fn declare(
        &mut self,
        parent: Option<&ResourceHandle>,
        logical_id: &str,
        resource: Resource,
    ) -> ProvisionResult<ResourceHandle>;

    /// Order `dependent` after `dependency` at apply time
    fn add_dependency(
        &mut self,
        dependent: &ResourceHandle,
        dependency: &ResourceHandle,
    ) -> ProvisionResult<()>;
}
