//! Hosted zone delegation
//!
//! Creates a child zone and registers it with the root zone. When both zones
//! live in the same account the NS record is written straight into the
//! parent zone. Across accounts the parent zone cannot be referenced
//! directly, so the record is written through a role the parent account
//! grants, named `{prefix}HostedZoneDelegationRole`.

use crate::domain::entities::{
    CrossAccountDelegationRecordSpec, DelegatedZone, DelegationKind, DomainPolicy,
    HostedZoneImport, HostedZoneSpec, RemovalPolicy, Resource, RoleImport,
    ZoneDelegationRecordSpec,
};
use crate::domain::ports::{Provisioner, ResourceHandle};
use crate::domain::value_objects::AccountId;
use crate::error::PlanResult;

/// What to delegate and on whose behalf
#[derive(Debug, Clone, Copy)]
pub struct DelegationRequest<'a> {
    pub child_zone_name: &'a str,
    pub child_account_id: &'a AccountId,
    pub service_prefix: &'a str,
    pub service_name: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct HostedZoneDelegator<'a> {
    policy: &'a DomainPolicy,
}

impl<'a> HostedZoneDelegator<'a> {
    pub fn new(policy: &'a DomainPolicy) -> Self {
        Self { policy }
    }

    /// Role in the root zone's account that may write delegation records
    pub fn delegation_role_arn(&self, service_prefix: &str) -> String {
        format!(
            "arn:aws:iam::{}:role/{}HostedZoneDelegationRole",
            self.policy.root_zone_account_id, service_prefix
        )
    }

    /// Declare the child zone and exactly one delegation record for it.
    pub fn delegate(
        &self,
        provisioner: &mut dyn Provisioner,
        scope: &ResourceHandle,
        request: &DelegationRequest<'_>,
    ) -> PlanResult<DelegatedZone> {
        let zone = provisioner.declare(
            Some(scope),
            &format!("{}HostedZone", request.service_name),
            Resource::HostedZone(HostedZoneSpec {
                zone_name: request.child_zone_name.to_string(),
            }),
        )?;

        let (delegation, delegation_record) =
            if self.policy.requires_cross_account(request.child_account_id) {
                self.delegate_cross_account(provisioner, scope, &zone, request)?
            } else {
                self.delegate_same_account(provisioner, scope, &zone, request)?
            };

        tracing::info!(
            zone = request.child_zone_name,
            delegation = %delegation,
            parent = %self.policy.root_zone_name,
            "delegated hosted zone"
        );

        Ok(DelegatedZone {
            zone,
            zone_name: request.child_zone_name.to_string(),
            delegation,
            delegation_record,
        })
    }

    fn delegate_cross_account(
        &self,
        provisioner: &mut dyn Provisioner,
        scope: &ResourceHandle,
        zone: &ResourceHandle,
        request: &DelegationRequest<'_>,
    ) -> PlanResult<(DelegationKind, ResourceHandle)> {
        let role_arn = self.delegation_role_arn(request.service_prefix);
        let role = provisioner.declare(
            Some(scope),
            &format!("{}DelegationRole", request.service_name),
            Resource::RoleImport(RoleImport {
                role_arn: role_arn.clone(),
            }),
        )?;

        let record = provisioner.declare(
            Some(scope),
            &format!("{}CrossAccountDelegationRecord", request.service_name),
            Resource::CrossAccountDelegationRecord(CrossAccountDelegationRecordSpec {
                delegated_zone: zone.clone(),
                delegation_role: role,
                parent_hosted_zone_id: self.policy.root_zone_id.clone(),
                removal_policy: RemovalPolicy::Destroy,
            }),
        )?;

        Ok((DelegationKind::CrossAccount { role_arn }, record))
    }

    fn delegate_same_account(
        &self,
        provisioner: &mut dyn Provisioner,
        scope: &ResourceHandle,
        zone: &ResourceHandle,
        request: &DelegationRequest<'_>,
    ) -> PlanResult<(DelegationKind, ResourceHandle)> {
        tracing::debug!(root_zone_id = %self.policy.root_zone_id, "referencing root hosted zone");
        let parent_zone = provisioner.declare(
            Some(scope),
            &format!("{}RootHostedZone", request.service_name),
            Resource::HostedZoneImport(HostedZoneImport {
                hosted_zone_id: self.policy.root_zone_id.clone(),
                zone_name: self.policy.root_zone_name.clone(),
            }),
        )?;

        let record = provisioner.declare(
            Some(scope),
            &format!("{}DelegationRecord", request.service_name),
            Resource::ZoneDelegationRecord(ZoneDelegationRecordSpec {
                parent_zone: parent_zone.clone(),
                record_name: request.child_zone_name.to_string(),
                name_servers_of: zone.clone(),
            }),
        )?;

        Ok((DelegationKind::SameAccount { parent_zone }, record))
    }
}
