//! Property tests for set names and command text.

use proptest::prelude::*;

use krnr::domain::services::{sanitize_command, validate_command};
use krnr::domain::value_objects::{sanitize_name, validate_name};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Whatever survives sanitizing is either empty or a valid name.
    #[test]
    fn property_sanitized_names_validate(raw in "(?s).{0,64}") {
        let (cleaned, _) = sanitize_name(&raw);
        if !cleaned.is_empty() {
            prop_assert!(validate_name(&cleaned).is_ok(), "{:?} -> {:?}", raw, cleaned);
        }
    }

    /// PROPERTY: Sanitizing a name twice changes nothing the second time.
    #[test]
    fn property_sanitize_name_is_idempotent(raw in "(?s).{0,64}") {
        let (once, _) = sanitize_name(&raw);
        let (twice, changed) = sanitize_name(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert!(!changed);
    }

    /// PROPERTY: Printable ASCII names are accepted as long as they are not blank.
    #[test]
    fn property_printable_names_validate(name in "[ -~]{1,40}") {
        prop_assert_eq!(validate_name(&name).is_ok(), !name.trim().is_empty());
    }

    /// PROPERTY: Sanitized single-line commands never contain smart quotes.
    #[test]
    fn property_sanitized_commands_are_plain(raw in "[^\\n\\r]{0,80}") {
        let cleaned = sanitize_command(&raw);
        prop_assert!(
            !cleaned.contains(['\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{00A0}']),
            "smart quotes or NBSP left in {:?}",
            cleaned
        );
        prop_assert!(!cleaned.contains('\0'), "NUL left in {:?}", cleaned);
    }

    /// PROPERTY: Commands with an embedded newline are always rejected.
    #[test]
    fn property_newlines_are_rejected(left in "[a-z ]{0,20}", right in "[a-z ]{0,20}") {
        let command = format!("{}\n{}", left, right);
        prop_assert!(validate_command(&command).is_err());
    }
}
