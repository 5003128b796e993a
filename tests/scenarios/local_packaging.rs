//! Building container images from sibling checkouts

use std::path::PathBuf;

use stackplan::config::apply_overrides;
use stackplan::domain::entities::Resource;
use stackplan::domain::value_objects::PackagePathMode;
use stackplan::synthesize;

use crate::common::sample_config;

fn image_directories(config: &stackplan::DeploymentConfig) -> Vec<(PathBuf, String)> {
    synthesize(config)
        .unwrap()
        .plan
        .resources
        .into_iter()
        .filter_map(|r| match r.resource {
            Resource::TaskDefinition(spec) => {
                Some((spec.container.image.directory, spec.container.image.dockerfile))
            }
            _ => None,
        })
        .collect()
}

#[test]
fn pipeline_mode_uses_checkout_in_place() {
    let dirs = image_directories(&sample_config());
    assert_eq!(
        dirs,
        vec![
            (PathBuf::from("MacroSurferService"), "Dockerfile.devo".to_string()),
            (PathBuf::from("MacroSurferService"), "Dockerfile.prod".to_string()),
        ]
    );
}

#[test]
fn local_mode_from_deployment_env() {
    let config = apply_overrides(sample_config(), |key| match key {
        "DEPLOYMENT_ENV" => Some("local".to_string()),
        "STACKPLAN_LOCAL_PACKAGE_ROOT" => Some("/work/src".to_string()),
        _ => None,
    });
    assert_eq!(config.packaging.mode, PackagePathMode::Local);

    let dirs = image_directories(&config);
    assert!(dirs
        .iter()
        .all(|(dir, _)| dir == &PathBuf::from("/work/src/MacroSurferService")));
}

#[test]
fn package_mode_override_wins_over_deployment_env() {
    let config = apply_overrides(sample_config(), |key| match key {
        "DEPLOYMENT_ENV" => Some("local".to_string()),
        "STACKPLAN_PACKAGE_MODE" => Some("pipeline".to_string()),
        _ => None,
    });

    let dirs = image_directories(&config);
    assert!(dirs
        .iter()
        .all(|(dir, _)| dir == &PathBuf::from("MacroSurferService")));
}
