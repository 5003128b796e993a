//! Property tests for hosted zone delegation

use proptest::prelude::*;
use stackplan::domain::entities::{DelegationKind, DomainPolicy, Resource, StackSpec};
use stackplan::domain::services::{DelegationRequest, HostedZoneDelegator};
use stackplan::domain::value_objects::AccountId;
use stackplan::infrastructure::InMemoryProvisioner;
use stackplan::Provisioner;

fn account() -> impl Strategy<Value = AccountId> {
    "[0-9]{12}".prop_map(|s| AccountId::parse(&s).unwrap())
}

fn policy(account: AccountId) -> DomainPolicy {
    DomainPolicy {
        root_zone_id: "Z0123456789".to_string(),
        root_zone_name: "example.com".to_string(),
        root_zone_account_id: account,
        root_zone_name_servers: Vec::new(),
    }
}

fn is_delegation_record(resource: &Resource) -> bool {
    matches!(
        resource,
        Resource::ZoneDelegationRecord(_) | Resource::CrossAccountDelegationRecord(_)
    )
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    /// One child zone, exactly one delegation record, on the path the
    /// account relationship dictates.
    #[test]
    fn prop_exactly_one_record_on_the_right_path(
        root_account in account(),
        child_account in account(),
        same in any::<bool>(),
    ) {
        let child_account = if same { root_account.clone() } else { child_account };
        let policy = policy(root_account.clone());
        let mut provisioner = InMemoryProvisioner::new();
        let scope = provisioner
            .declare(None, "Stack", Resource::Stack(StackSpec {
                name: "Stack".to_string(),
                account: None,
                region: None,
            }))
            .unwrap();

        let zone = HostedZoneDelegator::new(&policy)
            .delegate(&mut provisioner, &scope, &DelegationRequest {
                child_zone_name: "service-beta.example.com",
                child_account_id: &child_account,
                service_prefix: "Surf",
                service_name: "SurfApi",
            })
            .unwrap();

        let plan = provisioner.into_plan();
        let records: Vec<_> = plan
            .resources
            .iter()
            .filter(|r| is_delegation_record(&r.resource))
            .collect();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(&records[0].id, &zone.delegation_record);

        let zones = plan
            .resources
            .iter()
            .filter(|r| matches!(r.resource, Resource::HostedZone(_)))
            .count();
        prop_assert_eq!(zones, 1);

        match &zone.delegation {
            DelegationKind::CrossAccount { role_arn } => {
                prop_assert!(root_account != child_account);
                prop_assert_eq!(
                    role_arn,
                    &format!("arn:aws:iam::{}:role/SurfHostedZoneDelegationRole", root_account)
                );
            }
            DelegationKind::SameAccount { .. } => prop_assert_eq!(&root_account, &child_account),
        }
    }
}
