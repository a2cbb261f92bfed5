//! The stored author identity.

use crate::common::*;
use crate::{assert_output_contains, assert_success};

#[test]
fn contract_whoami_set_show_clear() {
    let env = TestEnv::new();

    let empty = env.run(&["whoami", "show"]);
    assert_success!(empty);
    assert_eq!(empty.stdout.trim(), "no stored author identity");

    let set = env.run(&["whoami", "set", "--name", "Grace", "--email", "grace@example.com"]);
    assert_success!(set);
    assert_eq!(set.stdout.trim(), "stored author as: Grace <grace@example.com>");
    assert!(env.data_dir().join("whoami.json").is_file());

    let shown = env.run(&["whoami", "show"]);
    assert_eq!(shown.stdout.trim(), "Grace <grace@example.com>");

    let cleared = env.run(&["whoami", "clear"]);
    assert_success!(cleared);
    assert_eq!(cleared.stdout.trim(), "cleared stored author identity");
    assert_eq!(env.run(&["whoami", "show"]).stdout.trim(), "no stored author identity");
}

#[test]
fn contract_whoami_without_email() {
    let env = TestEnv::new();
    let set = env.run(&["whoami", "set", "-n", "Linus"]);
    assert_success!(set);
    assert_eq!(set.stdout.trim(), "stored author as: Linus");
}

#[test]
fn contract_clear_without_identity_succeeds() {
    let env = TestEnv::new();
    assert_success!(env.run(&["whoami", "clear"]));
}

#[test]
fn contract_saved_sets_default_to_stored_author() {
    let env = TestEnv::new();
    assert_success!(env.run(&["whoami", "set", "--name", "Grace", "--email", "grace@example.com"]));
    env.save("mine", &["echo"]);
    assert_success!(env.run(&["save", "theirs", "-a", "Ada", "-c", "echo"]));

    assert_output_contains!(env.run(&["describe", "mine"]), "Author: Grace <grace@example.com>");
    let theirs = env.run(&["describe", "theirs"]);
    assert_output_contains!(theirs, "Author: Ada\n");
    assert!(!theirs.stdout.contains("grace@example.com"));
}
