//! Exporting and importing registries and single sets.

use crate::common::*;
use crate::{assert_failure, assert_output_contains, assert_success};

#[test]
fn contract_export_db_copies_the_registry() {
    let env = TestEnv::new();
    env.save("one", &["echo 1"]);

    let dst = env.work_path("backup.db");
    let dst_arg = dst.display().to_string();
    let result = env.run(&["export", "db", "--dst", &dst_arg]);
    assert_success!(result);
    assert_output_contains!(result, &format!("exported database to {}", dst_arg));
    assert_output_contains!(result, "sha256:");
    assert!(dst.is_file());
}

#[test]
fn contract_export_db_defaults_to_dated_file_in_cwd() {
    let env = TestEnv::new();
    env.save("one", &["echo 1"]);

    let result = env.run(&["export", "db"]);
    assert_success!(result);

    let exported: Vec<_> = std::fs::read_dir(env.work_dir.path())
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|n| n.starts_with("krnr-") && n.ends_with(".db"))
        .collect();
    assert_eq!(exported.len(), 1, "got {:?}", exported);
}

#[test]
fn contract_export_set_then_import_into_fresh_registry() {
    let source = TestEnv::new();
    source.save("shared", &["echo shared"]);
    assert_success!(source.run(&["tag", "add", "shared", "team"]));

    let file = source.work_path("shared.db");
    let file_arg = file.display().to_string();
    let exported = source.run(&["export", "set", "shared", "--dst", &file_arg]);
    assert_success!(exported);
    assert_eq!(
        exported.stdout.trim(),
        format!("exported command set 'shared' to {}", file_arg)
    );

    let target = TestEnv::new();
    let imported = target.run(&["import", "set", &file_arg]);
    assert_success!(imported);
    assert_output_contains!(imported, &format!("imported command set(s) from {}", file_arg));

    let described = target.run(&["describe", "shared"]);
    assert_success!(described);
    assert_output_contains!(described, "1: echo shared");
    assert_output_contains!(described, "Tags: team");
}

#[test]
fn contract_import_set_renames_on_conflict_by_default() {
    let env = TestEnv::new();
    env.save("dup", &["echo mine"]);
    let file = env.work_path("dup.db");
    let file_arg = file.display().to_string();
    assert_success!(env.run(&["export", "set", "dup", "--dst", &file_arg]));

    assert_success!(env.run(&["import", "set", &file_arg]));
    let listed = env.run(&["list"]);
    assert_output_contains!(listed, "- dup\n");
    assert_output_contains!(listed, "- dup-import-1\n");
}

#[test]
fn contract_import_set_skip_and_merge() {
    let env = TestEnv::new();
    env.save("m", &["echo a"]);
    let file = env.work_path("m.db");
    let file_arg = file.display().to_string();
    assert_success!(env.run(&["export", "set", "m", "--dst", &file_arg]));
    assert_success!(env.run(&["edit", "m", "-c", "echo a", "-c", "echo b"]));

    assert_success!(env.run(&["import", "set", &file_arg, "--on-conflict", "skip"]));
    assert_output_contains!(env.run(&["describe", "m"]), "1: echo a\n2: echo b\n");

    assert_success!(env.run(&[
        "import", "set", &file_arg, "--on-conflict", "merge", "--dedupe"
    ]));
    let described = env.run(&["describe", "m"]);
    assert_output_contains!(described, "1: echo a\n2: echo b\n");
    assert!(!described.stdout.contains("3: "), "dedupe kept a duplicate:\n{}", described.stdout);
}

#[test]
fn contract_import_rejects_unknown_policy() {
    let env = TestEnv::new();
    env.save("x", &["echo"]);
    let file = env.work_path("x.db");
    let file_arg = file.display().to_string();
    assert_success!(env.run(&["export", "set", "x", "--dst", &file_arg]));

    let result = env.run(&["import", "set", &file_arg, "--on-conflict", "clobber"]);
    assert_failure!(result);
    assert_output_contains!(result, "unknown on-conflict policy: clobber");
}

#[test]
fn contract_import_db_refuses_to_clobber_without_overwrite() {
    let env = TestEnv::new();
    env.save("live", &["echo live"]);
    let backup = env.work_path("backup.db");
    let backup_arg = backup.display().to_string();
    assert_success!(env.run(&["export", "db", "--dst", &backup_arg]));

    let refused = env.run(&["import", "db", &backup_arg]);
    assert_failure!(refused);
    assert_output_contains!(refused, "destination database exists");
}

#[test]
fn contract_import_db_overwrite_replaces_registry() {
    let source = TestEnv::new();
    source.save("from-backup", &["echo restored"]);
    let backup = source.work_path("backup.db");
    let backup_arg = backup.display().to_string();
    assert_success!(source.run(&["export", "db", "--dst", &backup_arg]));

    let env = TestEnv::new();
    env.save("current", &["echo current"]);
    let result = env.run(&["import", "db", &backup_arg, "--overwrite"]);
    assert_success!(result);
    assert_output_contains!(result, &format!("imported database from {}", backup_arg));

    let listed = env.run(&["list"]);
    assert_eq!(listed.stdout.trim(), "- from-backup");
}

#[test]
fn contract_import_missing_source_fails() {
    let env = TestEnv::new();
    let result = env.run(&["import", "set", "does-not-exist.db"]);
    assert_failure!(result);
    assert_output_contains!(result, "source not found");
}

#[test]
fn contract_interactive_export_chooser_reads_stdin() {
    let env = TestEnv::new();
    env.save("pick", &["echo"]);

    let result = env.run_with_stdin(&["export"], "2\npick\npicked.db\n");
    assert_success!(result);
    assert_output_contains!(result, "Select export type:\n  1) db\n  2) set\n");
    assert_output_contains!(result, "exported command set 'pick' to picked.db");
    assert!(env.work_path("picked.db").is_file());
}

#[test]
fn contract_interactive_export_invalid_choice() {
    let env = TestEnv::new();
    let result = env.run_with_stdin(&["export"], "9\n");
    assert_failure!(result);
    assert_output_contains!(result, "invalid choice: 9");
}
