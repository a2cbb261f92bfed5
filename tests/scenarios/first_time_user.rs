//! Scenario: First Time User
//!
//! Journey: A new user saves a workflow, runs it, changes it, and undoes the
//! change.
//!
//! Success Criteria:
//! - The registry is created on first use
//! - Every change shows up in history
//! - Rollback brings the old workflow back

use crate::common::*;
use crate::{assert_output_contains, assert_success};

/// SCENARIO: Save, tweak, and roll back a workflow
#[cfg(unix)]
#[test]
fn scenario_save_run_edit_rollback() {
    let env = TestEnv::new();
    assert!(!env.db_path().exists());

    let saved = env.run(&["save", "build", "-d", "local build", "-c", "echo compile", "-c", "echo test"]);
    assert_success!(saved);
    assert!(env.db_path().is_file(), "registry should be created on first save");

    let ran = env.run(&["run", "build"]);
    assert_success!(ran);
    assert_eq!(ran.stdout, "-> echo compile\ncompile\n-> echo test\ntest\n");

    // last_run is recorded after a successful run
    assert_output_contains!(env.run(&["describe", "build"]), "Last run: ");

    assert_success!(env.run(&["edit", "build", "-c", "echo compile --release"]));
    let ran = env.run(&["run", "build", "--suppress-command"]);
    assert_eq!(ran.stdout, "compile --release\n");

    let history = env.run(&["history", "build"]);
    assert_eq!(history.stdout.lines().count(), 2);

    assert_success!(env.run(&["rollback", "build", "--version", "1"]));
    let ran = env.run(&["run", "build", "--suppress-command"]);
    assert_eq!(ran.stdout, "compile\ntest\n");
    assert_eq!(env.run(&["history", "build"]).stdout.lines().count(), 3);
}

/// SCENARIO: Record a workflow from piped input and find it again
#[test]
fn scenario_record_then_find() {
    let env = TestEnv::new();

    let recorded = env.run_with_stdin(&["record", "cleanup", "-d", "tidy up"], "git gc\ngit prune\n");
    assert_success!(recorded);
    assert_success!(env.run(&["tag", "add", "cleanup", "git"]));

    let by_tag = env.run(&["list", "--tag", "git"]);
    assert_eq!(by_tag.stdout.trim(), "- cleanup");

    let by_text = env.run(&["list", "--filter", "prune"]);
    assert_eq!(by_text.stdout.trim(), "- cleanup");

    let described = env.run(&["describe", "cleanup"]);
    assert_output_contains!(described, "Description: tidy up");
    assert_output_contains!(described, "1: git gc\n2: git prune\n");
}
