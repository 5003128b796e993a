//! Provisioning plan entity
//!
//! The full output of one plan construction: every declared resource in
//! declaration order plus the dependency edges between them.

use serde::Serialize;

use crate::domain::ports::ResourceHandle;
use crate::domain::value_objects::PlanDigest;
use crate::error::PlanResult;

use super::Resource;

/// A declared resource with its handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedResource {
    pub id: ResourceHandle,
    #[serde(flatten)]
    pub resource: Resource,
}

/// `dependent` is applied after `dependency`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyEdge {
    pub dependent: ResourceHandle,
    pub dependency: ResourceHandle,
}

impl DependencyEdge {
    pub fn new(dependent: ResourceHandle, dependency: ResourceHandle) -> Self {
        Self {
            dependent,
            dependency,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProvisioningPlan {
    pub resources: Vec<PlannedResource>,
    pub dependencies: Vec<DependencyEdge>,
}

impl ProvisioningPlan {
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.id.id() == id)
            .map(|r| &r.resource)
    }

    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a PlannedResource> {
        self.resources.iter().filter(move |r| r.resource.kind() == kind)
    }

    pub fn count_of(&self, kind: &str) -> usize {
        self.of_kind(kind).count()
    }

    /// Resources nested under `scope`
    pub fn within<'a>(
        &'a self,
        scope: &'a ResourceHandle,
    ) -> impl Iterator<Item = &'a PlannedResource> {
        self.resources.iter().filter(move |r| r.id.is_within(scope))
    }

    pub fn depends_on(&self, dependent: &ResourceHandle, dependency: &ResourceHandle) -> bool {
        self.dependencies
            .iter()
            .any(|e| &e.dependent == dependent && &e.dependency == dependency)
    }

    pub fn to_json_pretty(&self) -> PlanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fingerprint of the serialized plan
    pub fn digest(&self) -> PlanResult<PlanDigest> {
        let content = serde_json::to_string(self)?;
        Ok(PlanDigest::from_content(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{HostedZoneSpec, StackSpec};

    fn sample() -> ProvisioningPlan {
        let stack = ResourceHandle::new("Stack");
        let zone = ResourceHandle::new("Stack/Zone");
        ProvisioningPlan {
            resources: vec![
                PlannedResource {
                    id: stack.clone(),
                    resource: Resource::Stack(StackSpec {
                        name: "Stack".to_string(),
                        account: None,
                        region: None,
                    }),
                },
                PlannedResource {
                    id: zone.clone(),
                    resource: Resource::HostedZone(HostedZoneSpec {
                        zone_name: "a.example.com".to_string(),
                    }),
                },
            ],
            dependencies: vec![DependencyEdge::new(zone, stack)],
        }
    }

    #[test]
    fn lookup_helpers() {
        let plan = sample();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.count_of("hosted_zone"), 1);
        assert!(plan.get("Stack/Zone").is_some());
        assert_eq!(plan.within(&ResourceHandle::new("Stack")).count(), 1);
        assert!(plan.depends_on(
            &ResourceHandle::new("Stack/Zone"),
            &ResourceHandle::new("Stack")
        ));
    }

    #[test]
    fn planned_resource_flattens_type_tag() {
        let plan = sample();
        let json = serde_json::to_value(&plan.resources[1]).unwrap();
        assert_eq!(json["id"], "Stack/Zone");
        assert_eq!(json["type"], "hosted_zone");
        assert_eq!(json["zone_name"], "a.example.com");
    }

    #[test]
    fn digest_is_stable_for_equal_plans() {
        assert_eq!(sample().digest().unwrap(), sample().digest().unwrap());
        assert_ne!(
            sample().digest().unwrap(),
            ProvisioningPlan::default().digest().unwrap()
        );
    }
}
