//! Property tests for `krnr record` input handling.

use proptest::prelude::*;

use krnr::domain::services::{merge_commands, record_commands};
use krnr::domain::value_objects::ConflictPolicy;

fn command_line() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9 |&>./-]{0,30}[a-z0-9]"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Arbitrary bytes never make the recorder panic or error.
    #[test]
    fn property_recorder_never_fails(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let commands = record_commands(bytes.as_slice()).unwrap();
        for c in &commands {
            prop_assert!(!c.is_empty());
            prop_assert_eq!(c.trim(), c.as_str());
        }
    }

    /// PROPERTY: Plain lines come back in order, without comments and blanks.
    #[test]
    fn property_recorder_keeps_order(lines in proptest::collection::vec(command_line(), 0..10)) {
        let mut input = String::new();
        for line in &lines {
            input.push_str("  ");
            input.push_str(line);
            input.push_str("\n# a comment\n\n");
        }
        prop_assert_eq!(record_commands(input.as_bytes()).unwrap(), lines);
    }

    /// PROPERTY: Nothing after the `:end` sentinel is recorded.
    #[test]
    fn property_recorder_stops_at_sentinel(
        before in proptest::collection::vec(command_line(), 0..5),
        after in proptest::collection::vec(command_line(), 1..5),
    ) {
        let input = format!("{}\n:end\n{}\n", before.join("\n"), after.join("\n"));
        prop_assert_eq!(record_commands(input.as_bytes()).unwrap(), before);
    }

    /// PROPERTY: Merging keeps the existing commands as a prefix.
    #[test]
    fn property_merge_keeps_existing_prefix(
        existing in proptest::collection::vec(command_line(), 0..6),
        incoming in proptest::collection::vec(command_line(), 0..6),
        dedupe in any::<bool>(),
    ) {
        let merged = merge_commands(&existing, &incoming, dedupe);
        prop_assert_eq!(&merged[..existing.len()], existing.as_slice());
        if dedupe {
            for c in &merged[existing.len()..] {
                prop_assert!(!existing.contains(c));
            }
        } else {
            prop_assert_eq!(merged.len(), existing.len() + incoming.len());
        }
    }

    /// PROPERTY: Policy names parse back to the same policy.
    #[test]
    fn property_policy_names_parse(index in 0usize..4, pad in " {0,3}") {
        let policy = ConflictPolicy::ALL[index];
        let text = format!("{}{}{}", pad, policy.as_str(), pad);
        prop_assert_eq!(text.parse::<ConflictPolicy>(), Ok(policy));
    }
}
