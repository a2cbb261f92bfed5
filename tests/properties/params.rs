//! Property tests for `{{name}}` parameters.

use std::collections::BTreeMap;

use proptest::prelude::*;

use krnr::domain::value_objects::{apply_params, find_params, parse_param_flag};

fn param_name() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_.-]{0,12}"
}

fn plain_value() -> impl Strategy<Value = String> {
    // No braces so substituted text cannot form a new placeholder.
    "[a-zA-Z0-9 /._-]{0,20}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every placeholder is found once, in order of first use.
    #[test]
    fn property_find_params_is_unique_and_ordered(
        names in proptest::collection::vec(param_name(), 1..6),
    ) {
        let text = names
            .iter()
            .map(|n| format!("{{{{{}}}}}", n))
            .collect::<Vec<_>>()
            .join(" && ");

        let mut expected: Vec<String> = Vec::new();
        for n in &names {
            if !expected.contains(n) {
                expected.push(n.clone());
            }
        }
        prop_assert_eq!(find_params(&text), expected);
    }

    /// PROPERTY: With every value supplied, no placeholder is left behind.
    #[test]
    fn property_apply_params_substitutes_everything(
        entries in proptest::collection::btree_map(param_name(), plain_value(), 1..5),
    ) {
        let text = entries
            .keys()
            .map(|n| format!("echo {{{{ {} }}}}", n))
            .collect::<Vec<_>>()
            .join("; ");

        let applied = apply_params(&text, &entries).unwrap();
        prop_assert!(find_params(&applied).is_empty());
        for value in entries.values() {
            prop_assert!(applied.contains(value.as_str()));
        }
    }

    /// PROPERTY: Missing values are reported sorted and leave the text intact.
    #[test]
    fn property_missing_params_are_reported(
        names in proptest::collection::btree_set(param_name(), 1..5),
    ) {
        let text = names
            .iter()
            .rev()
            .map(|n| format!("{{{{{}}}}}", n))
            .collect::<Vec<_>>()
            .join(" ");

        let err = apply_params(&text, &BTreeMap::new()).unwrap_err();
        prop_assert_eq!(err.missing, names.into_iter().collect::<Vec<_>>());
        prop_assert_eq!(err.partial, text);
    }

    /// PROPERTY: `name=value` splits at the first `=`.
    #[test]
    fn property_param_flag_splits_at_first_equals(
        name in param_name(),
        value in "[a-z0-9=]{0,20}",
    ) {
        let (parsed_name, parsed) = parse_param_flag(&format!("{}={}", name, value)).unwrap();
        prop_assert_eq!(parsed_name, name);
        prop_assert_eq!(parsed.value, value);
        prop_assert!(!parsed.env_bound);
    }

    /// PROPERTY: A flag without `=` is always rejected.
    #[test]
    fn property_param_flag_without_equals_fails(flag in "[a-zA-Z0-9_:. -]{0,30}") {
        prop_assert!(parse_param_flag(&flag).is_err());
    }
}
