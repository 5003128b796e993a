//! A delegated service and a preset-zone service deployed side by side

use stackplan::domain::entities::{
    PresetHostedZoneAndCertificate, Resource, ServiceTemplate,
};
use stackplan::synthesize;

use crate::common::sample_config;

fn marketing_site() -> ServiceTemplate {
    let mut template = sample_config().services[0].clone();
    template.name = "MacroSurferSite".to_string();
    template.subdomain = None;
    template.preset = Some(PresetHostedZoneAndCertificate {
        hosted_zone_id: "Z0PRESET000001".to_string(),
        hosted_zone_name: "www.macrosurfer.com".to_string(),
        certificate_arn: "arn:aws:acm:us-west-2:372183484622:certificate/site".to_string(),
    });
    template
}

#[test]
fn preset_service_bypasses_delegation_in_every_stage() {
    let mut config = sample_config();
    config.services.push(marketing_site());

    let synthesis = synthesize(&config).unwrap();

    for stage in &synthesis.outline.stages {
        let site = stage
            .services
            .iter()
            .find(|s| s.service_name == "MacroSurferSite")
            .unwrap();
        assert!(site.zone.is_preset());
        assert_eq!(site.domain_name, "www.macrosurfer.com");

        let under_site: Vec<&Resource> = synthesis
            .plan
            .resources
            .iter()
            .filter(|r| r.id.is_within(&site.stack))
            .map(|r| &r.resource)
            .collect();
        assert!(!under_site
            .iter()
            .any(|r| matches!(r, Resource::HostedZone(_) | Resource::Certificate(_))));
        assert!(under_site
            .iter()
            .any(|r| matches!(r, Resource::CertificateImport(c) if c.certificate_arn.ends_with("/site"))));
    }
}

#[test]
fn delegated_service_follows_account_relationship() {
    let mut config = sample_config();
    config.services.push(marketing_site());

    let synthesis = synthesize(&config).unwrap();
    let backend_paths: Vec<(String, bool)> = synthesis
        .outline
        .stages
        .iter()
        .flat_map(|stage| {
            stage
                .services
                .iter()
                .filter(|s| s.service_name == "MacroSurferBackend")
                .map(move |s| {
                    (
                        stage.label.clone(),
                        s.zone.delegation().unwrap().is_cross_account(),
                    )
                })
        })
        .collect();

    assert_eq!(
        backend_paths,
        vec![("beta".to_string(), true), ("prod".to_string(), false)]
    );
}

#[test]
fn each_service_gets_its_own_stack_per_stage() {
    let mut config = sample_config();
    config.services.push(marketing_site());

    let synthesis = synthesize(&config).unwrap();
    let stacks: Vec<&str> = synthesis
        .plan
        .of_kind("stack")
        .map(|r| r.id.logical_id())
        .collect();

    assert_eq!(
        stacks,
        vec![
            "MacroSurferPipelineStack",
            "MacroSurferVpcStack-beta",
            "MacroSurferBackend-beta",
            "MacroSurferSite-beta",
            "MacroSurferVpcStack-prod",
            "MacroSurferBackend-prod",
            "MacroSurferSite-prod",
        ]
    );
}
