//! Scenario: Team Shared Workflows
//!
//! Journey: One teammate exports a workflow, another imports it next to
//! their own version of it, then both keep working.
//!
//! Success Criteria:
//! - The exported file carries commands, tags and author
//! - Conflicts never silently replace local work
//! - Imported sets get their own history entry

use crate::common::*;
use crate::{assert_output_contains, assert_success};

/// SCENARIO: Share a set between two registries
#[test]
fn scenario_share_set_between_teammates() {
    let alice = TestEnv::new();
    assert_success!(alice.run(&["whoami", "set", "--name", "Alice", "--email", "alice@example.com"]));
    alice.save("release", &["git tag v1", "git push --tags"]);
    assert_success!(alice.run(&["tag", "add", "release", "shipping"]));

    let shared = alice.work_path("release.db");
    let shared_arg = shared.display().to_string();
    assert_success!(alice.run(&["export", "set", "release", "--dst", &shared_arg]));

    let bob = TestEnv::new();
    bob.save("release", &["make release"]);

    let imported = bob.run(&["import", "set", &shared_arg]);
    assert_success!(imported);

    // Bob's own set is untouched; Alice's lands beside it.
    assert_output_contains!(bob.run(&["describe", "release"]), "1: make release\n");
    let theirs = bob.run(&["describe", "release-import-1"]);
    assert_success!(theirs);
    assert_output_contains!(theirs, "Author: Alice <alice@example.com>");
    assert_output_contains!(theirs, "Tags: shipping");
    assert_output_contains!(theirs, "1: git tag v1\n2: git push --tags\n");

    let history = bob.run(&["history", "release-import-1"]);
    assert_success!(history);
    assert!(!history.stdout.trim().is_empty());

    // Merging later picks up only what Bob does not have yet.
    assert_success!(bob.run(&[
        "import", "set", &shared_arg, "--on-conflict", "merge", "--dedupe"
    ]));
    assert_output_contains!(
        bob.run(&["describe", "release"]),
        "1: make release\n2: git tag v1\n3: git push --tags\n"
    );
}

/// SCENARIO: Back up the whole registry and restore it elsewhere
#[test]
fn scenario_backup_and_restore_registry() {
    let laptop = TestEnv::new();
    laptop.save("one", &["echo 1"]);
    laptop.save("two", &["echo 2"]);

    let backup = laptop.work_path("backup.db");
    let backup_arg = backup.display().to_string();
    assert_success!(laptop.run(&["export", "db", "--dst", &backup_arg]));

    let desktop = TestEnv::new();
    assert_success!(desktop.run(&["import", "db", &backup_arg]));

    let listed = desktop.run(&["list"]);
    assert_output_contains!(listed, "- one\n");
    assert_output_contains!(listed, "- two\n");
}
