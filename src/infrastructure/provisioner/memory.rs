//! In-memory provisioner
//!
//! Records declarations into a `ProvisioningPlan` instead of creating
//! anything. Enforces the same constraints a real provider would reject
//! on: duplicate construct ids, hosted zone name collisions, dangling
//! references and dependency cycles.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::entities::{DependencyEdge, PlannedResource, ProvisioningPlan, Resource};
use crate::domain::ports::{ProvisionError, ProvisionResult, Provisioner, ResourceHandle};

/// Owner recorded for zones that exist outside this deployment
const EXTERNAL_OWNER: &str = "another deployment";

#[derive(Debug, Default)]
pub struct InMemoryProvisioner {
    resources: Vec<PlannedResource>,
    known: HashSet<ResourceHandle>,
    /// Normalized zone name -> owning handle id
    zones: BTreeMap<String, String>,
    dependencies: Vec<DependencyEdge>,
    /// dependent -> dependencies, for cycle detection
    adjacency: HashMap<ResourceHandle, Vec<ResourceHandle>>,
}

impl InMemoryProvisioner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend a zone with this name already exists and is not ours.
    pub fn with_existing_zone(mut self, zone_name: &str) -> Self {
        self.zones
            .insert(normalize_zone_name(zone_name), EXTERNAL_OWNER.to_string());
        self
    }

    pub fn resources(&self) -> &[PlannedResource] {
        &self.resources
    }

    pub fn dependencies(&self) -> &[DependencyEdge] {
        &self.dependencies
    }

    pub fn into_plan(self) -> ProvisioningPlan {
        ProvisioningPlan {
            resources: self.resources,
            dependencies: self.dependencies,
        }
    }

    fn ensure_known(&self, handle: &ResourceHandle) -> ProvisionResult<()> {
        if self.known.contains(handle) {
            Ok(())
        } else {
            Err(ProvisionError::UnknownHandle {
                id: handle.id().to_string(),
            })
        }
    }

    /// True if `to` is reachable from `from` along existing edges
    fn reaches(&self, from: &ResourceHandle, to: &ResourceHandle) -> bool {
        let mut stack = vec![from];
        let mut seen: HashSet<&ResourceHandle> = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == to {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(next) = self.adjacency.get(current) {
                stack.extend(next.iter());
            }
        }
        false
    }
}

impl Provisioner for InMemoryProvisioner {
    fn declare(
        &mut self,
        parent: Option<&ResourceHandle>,
        logical_id: &str,
        resource: Resource,
    ) -> ProvisionResult<ResourceHandle> {
        if logical_id.is_empty() || logical_id.contains('/') {
            return Err(ProvisionError::Rejected {
                resource: logical_id.to_string(),
                reason: "logical id must be non-empty and must not contain '/'".to_string(),
            });
        }
        if let Some(parent) = parent {
            self.ensure_known(parent)?;
        }
        for reference in resource.references() {
            self.ensure_known(reference)?;
        }

        let handle = ResourceHandle::child_of(parent, logical_id);
        if self.known.contains(&handle) {
            return Err(ProvisionError::DuplicateLogicalId {
                id: handle.id().to_string(),
            });
        }

        if let Resource::HostedZone(zone) = &resource {
            let name = normalize_zone_name(&zone.zone_name);
            if let Some(owner) = self.zones.get(&name) {
                return Err(ProvisionError::ZoneNameConflict {
                    zone_name: zone.zone_name.clone(),
                    owner: owner.clone(),
                });
            }
            self.zones.insert(name, handle.id().to_string());
        }

        tracing::trace!(id = %handle, kind = resource.kind(), "declared resource");
        self.known.insert(handle.clone());
        self.resources.push(PlannedResource {
            id: handle.clone(),
            resource,
        });
        Ok(handle)
    }

    fn add_dependency(
        &mut self,
        dependent: &ResourceHandle,
        dependency: &ResourceHandle,
    ) -> ProvisionResult<()> {
        self.ensure_known(dependent)?;
        self.ensure_known(dependency)?;

        if dependent == dependency || self.reaches(dependency, dependent) {
            return Err(ProvisionError::DependencyCycle {
                dependent: dependent.id().to_string(),
                dependency: dependency.id().to_string(),
            });
        }

        let edges = self.adjacency.entry(dependent.clone()).or_default();
        if edges.contains(dependency) {
            return Ok(());
        }
        edges.push(dependency.clone());
        self.dependencies
            .push(DependencyEdge::new(dependent.clone(), dependency.clone()));
        Ok(())
    }
}

fn normalize_zone_name(name: &str) -> String {
    name.trim().trim_end_matches('.').to_ascii_lowercase()
}
