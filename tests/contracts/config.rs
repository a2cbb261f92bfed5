//! `config.toml` and `KRNR_*` overrides.

use crate::common::*;
use crate::{assert_output_contains, assert_success};

#[test]
fn contract_unknown_config_key_warns_with_suggestion() {
    let env = TestEnv::new();
    env.write_config("[run]\nshel = \"sh\"\n");

    let result = env.run(&["list"]);
    assert_success!(result);
    assert!(
        result.stderr.contains("Unknown config key 'shel'"),
        "stderr:\n{}",
        result.stderr
    );
    assert!(result.stderr.contains("config.toml:2"), "stderr:\n{}", result.stderr);
    assert!(result.stderr.contains("did you mean 'shell'?"), "stderr:\n{}", result.stderr);
}

#[test]
fn contract_json_mode_suppresses_config_warnings() {
    let env = TestEnv::new();
    env.write_config("bogus = 1\n");

    let result = env.run(&["--json", "list"]);
    assert_success!(result);
    assert!(!result.stderr.contains("Unknown config key"));
}

#[test]
fn contract_invalid_config_falls_back_to_defaults() {
    let env = TestEnv::new();
    env.write_config("[run\nshell = ");

    let result = env.run(&["list"]);
    assert_success!(result);
    assert!(result.stderr.contains("ignoring"), "stderr:\n{}", result.stderr);
}

#[cfg(unix)]
#[test]
fn contract_krnr_shell_overrides_config() {
    let env = TestEnv::new();
    env.write_config("[run]\nshell = \"does-not-exist\"\n");
    env.save("hi", &["echo hi"]);

    let result = env.run_with_env(&["run", "hi", "-v"], &[("KRNR_SHELL", "/bin/sh")]);
    assert_success!(result);
    assert!(result.stderr.contains("shell: /bin/sh"), "stderr:\n{}", result.stderr);
    assert_output_contains!(result, "hi\n");
}

#[test]
fn contract_krnr_db_moves_the_registry() {
    let env = TestEnv::new();
    let custom = env.work_path("elsewhere.db");
    let custom_arg = custom.display().to_string();

    let saved = env.run_with_env(
        &["save", "moved", "-c", "echo"],
        &[("KRNR_DB", custom_arg.as_str())],
    );
    assert_success!(saved);
    assert!(custom.is_file());
    assert!(!env.db_path().exists());
}

#[test]
fn contract_krnr_db_still_creates_the_data_dir() {
    let env = TestEnv::new();
    let custom = env.work_path("nested/registry.db");
    let custom_arg = custom.display().to_string();
    assert!(!env.data_dir().exists());

    let listed = env.run_with_env(&["list"], &[("KRNR_DB", custom_arg.as_str())]);
    assert_success!(listed);
    assert!(custom.is_file());
    assert!(env.data_dir().is_dir());
}
