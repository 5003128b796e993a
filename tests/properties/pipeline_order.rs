//! Property tests for pipeline stage ordering

use proptest::prelude::*;
use stackplan::domain::entities::StageDescriptor;
use stackplan::domain::value_objects::AccountId;
use stackplan::{synthesize, DeploymentConfig};

const SAMPLE: &str = include_str!("../../demos/macrosurfer.toml");

fn stage_labels() -> impl Strategy<Value = Vec<String>> {
    Just(
        ["alpha", "beta", "gamma", "prod", "canary"]
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>(),
    )
    .prop_shuffle()
    .prop_flat_map(|labels| {
        let len = labels.len();
        (Just(labels), 1..=len)
    })
    .prop_map(|(labels, n)| labels.into_iter().take(n).collect())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]

    /// Stages appear in the outline in registry order, each gated on the
    /// one before it.
    #[test]
    fn prop_stage_order_matches_registry(labels in stage_labels(), cross in any::<bool>()) {
        let mut config: DeploymentConfig = toml::from_str(SAMPLE).unwrap();
        let account = if cross { "111122223333" } else { "372183484622" };
        config.stages = labels
            .iter()
            .map(|label| {
                StageDescriptor::new(AccountId::parse(account).unwrap(), "us-west-2", label.as_str())
            })
            .collect();

        let synthesis = synthesize(&config).unwrap();
        let outline_labels: Vec<String> = synthesis
            .outline
            .stage_labels()
            .into_iter()
            .map(String::from)
            .collect();
        prop_assert_eq!(&outline_labels, &labels);

        let stage_edges = synthesis
            .plan
            .dependencies
            .iter()
            .filter(|e| e.dependent.logical_id().starts_with("Stage"))
            .count();
        prop_assert_eq!(stage_edges, labels.len() - 1);

        for (position, stage) in synthesis.outline.stages.iter().enumerate() {
            for service in &stage.services {
                prop_assert_eq!(
                    service.zone.delegation().map(|d| d.is_cross_account()),
                    Some(cross)
                );
            }
            prop_assert_eq!(&stage.label, &labels[position]);
        }
    }
}
