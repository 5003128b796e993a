//! Zone names that already exist abort construction

use stackplan::application::SynthUseCase;
use stackplan::infrastructure::{ConnectionSourceConnector, InMemoryProvisioner};
use stackplan::PlanError;

use crate::common::sample_config;

#[test]
fn existing_child_zone_is_reported_as_provision_error() {
    let config = sample_config();
    let provisioner = InMemoryProvisioner::new().with_existing_zone("service-beta.macrosurfer.com");
    let mut use_case = SynthUseCase::new(provisioner, ConnectionSourceConnector);

    let err = use_case.execute(&config).unwrap_err();

    assert!(matches!(err, PlanError::Provision(_)));
    assert!(!err.is_configuration());
    assert!(err.to_string().contains("service-beta.macrosurfer.com"));
}

#[test]
fn production_stage_label_is_configurable() {
    let mut config = sample_config();
    config.domain.production_label = "beta".to_string();

    let synthesis = stackplan::synthesize(&config).unwrap();
    let domains: Vec<&str> = synthesis
        .outline
        .stages
        .iter()
        .flat_map(|s| s.services.iter().map(|svc| svc.domain_name.as_str()))
        .collect();

    assert_eq!(
        domains,
        vec!["service.macrosurfer.com", "service-prod.macrosurfer.com"]
    );
}
