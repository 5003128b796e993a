//! Property tests for account id parsing

use proptest::prelude::*;
use stackplan::domain::value_objects::AccountId;

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn prop_twelve_digits_parse(digits in "[0-9]{12}") {
        let id = AccountId::parse(&digits).unwrap();
        prop_assert_eq!(id.as_str(), digits.as_str());
    }

    #[test]
    fn prop_other_lengths_rejected(digits in "[0-9]{0,11}|[0-9]{13,20}") {
        prop_assert!(AccountId::parse(&digits).is_err());
    }

    #[test]
    fn prop_non_digits_rejected(prefix in "[0-9]{0,11}", bad in "[a-zA-Z_:]", pad in "[0-9]{11}") {
        let value: String = format!("{}{}{}", prefix, bad, pad).chars().take(12).collect();
        prop_assume!(value.len() == 12);
        prop_assert!(AccountId::parse(&value).is_err());
    }

    /// Never panics, whatever the input.
    #[test]
    fn prop_parse_total(value in ".*") {
        let _ = AccountId::parse(&value);
    }
}
