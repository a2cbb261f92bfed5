//! Property tests for versioning and rollback.

use proptest::prelude::*;

use krnr::domain::services::diff_commands;
use krnr::infrastructure::db;
use krnr::{Operation, RegistryUseCase, SetMetadata, SqliteCommandSetRepository};

fn commands() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z][a-z0-9 ]{0,12}[a-z0-9]", 1..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 32,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Diff counts match the lines tagged as inserted and deleted.
    #[test]
    fn property_diff_counts_match_lines(old in commands(), new in commands()) {
        let diff = diff_commands(&old, &new);
        let equal = diff.lines.len() - diff.additions - diff.deletions;
        prop_assert_eq!(equal + diff.deletions, old.len());
        prop_assert_eq!(equal + diff.additions, new.len());
        prop_assert_eq!(diff.has_changes(), old != new);
    }

    /// PROPERTY: Rolling back to v1 restores the original commands and adds a version.
    #[test]
    fn property_rollback_restores_first_version(
        original in commands(),
        edits in proptest::collection::vec(commands(), 1..4),
    ) {
        let repo = SqliteCommandSetRepository::new(db::open_in_memory().unwrap());
        let registry = RegistryUseCase::new(&repo);
        registry.save(&SetMetadata::named("p"), &original).unwrap();
        for edit in &edits {
            registry.replace_commands("p", edit).unwrap();
        }

        let diff = registry.rollback("p", 1).unwrap();
        prop_assert_eq!(diff.has_changes(), edits.last() != Some(&original));
        prop_assert_eq!(registry.get("p").unwrap().command_texts(), original);

        let history = registry.history("p").unwrap();
        prop_assert_eq!(history.len(), edits.len() + 2);
        prop_assert_eq!(history[0].operation, Operation::Rollback);
        prop_assert_eq!(history[0].version, edits.len() as i64 + 2);
    }
}
