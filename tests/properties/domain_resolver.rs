//! Property tests for child zone naming

use proptest::prelude::*;
use stackplan::DomainResolver;

fn label() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

fn domain() -> impl Strategy<Value = String> {
    "[a-z]{1,12}\\.(com|net|io|co\\.uk)"
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    /// Production owns the unsuffixed name.
    #[test]
    fn prop_production_is_unsuffixed(prod in label(), root in domain(), base in label()) {
        let resolver = DomainResolver::new(prod.clone());
        prop_assert_eq!(resolver.resolve(&prod, &root, &base), format!("{}.{}", base, root));
    }

    /// Every other stage gets `{base}-{stage}` under the same root.
    #[test]
    fn prop_non_production_is_suffixed(
        prod in label(),
        stage in label(),
        root in domain(),
        base in label(),
    ) {
        prop_assume!(stage != prod);
        let resolver = DomainResolver::new(prod);
        let name = resolver.resolve(&stage, &root, &base);

        prop_assert_eq!(&name, &format!("{}-{}.{}", base, stage, root));
        let suffix = format!(".{}", root);
        prop_assert!(name.ends_with(&suffix));
    }

    /// Distinct stages never share a child zone under one base and root.
    #[test]
    fn prop_distinct_stages_get_distinct_zones(
        prod in label(),
        a in label(),
        b in label(),
        root in domain(),
        base in label(),
    ) {
        prop_assume!(a != b);
        let resolver = DomainResolver::new(prod);
        prop_assert_ne!(resolver.resolve(&a, &root, &base), resolver.resolve(&b, &root, &base));
    }

    /// Resolution is a pure function of its inputs.
    #[test]
    fn prop_resolution_is_deterministic(stage in label(), root in domain(), base in label()) {
        let resolver = DomainResolver::default();
        prop_assert_eq!(
            resolver.resolve(&stage, &root, &base),
            resolver.resolve(&stage, &root, &base)
        );
    }
}
