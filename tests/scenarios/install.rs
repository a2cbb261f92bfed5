//! Scenario: Self-install and Uninstall
//!
//! Journey: A user copies krnr into their bin directory, puts it on PATH,
//! checks the status, then removes it again.
//!
//! Success Criteria:
//! - The binary lands in `~/krnr/bin`
//! - The rc file gains a PATH line that uninstall removes
//! - Status reflects each step

use crate::common::*;
use crate::{assert_output_contains, assert_success};

/// SCENARIO: Install to the user bin, then uninstall
#[cfg(unix)]
#[test]
fn scenario_user_install_round_trip() {
    let env = TestEnv::new();
    let fake_binary = env.work_path("krnr-build");
    std::fs::write(&fake_binary, b"#!/bin/sh\necho fake\n").unwrap();
    let from = fake_binary.display().to_string();
    let shell = [("SHELL", "/bin/bash")];

    let planned = env.run_with_env(&["install", "--user", "--from", &from, "--dry-run"], &shell);
    assert_success!(planned);
    assert_output_contains!(planned, "Planned actions for install to ");
    let target = env.home_dir.path().join("krnr").join("bin").join("krnr");
    assert!(!target.exists(), "dry run must not install");

    let installed = env.run_with_env(
        &["install", "--user", "--from", &from, "--yes", "--add-to-path"],
        &shell,
    );
    assert_success!(installed);
    assert_output_contains!(installed, "install completed");
    assert!(target.is_file());

    let rc = env.home_dir.path().join(".bashrc");
    let rc_content = std::fs::read_to_string(&rc).unwrap();
    assert!(rc_content.contains("krnr"), "rc file:\n{}", rc_content);

    let status = env.run(&["status"]);
    assert_success!(status);
    assert_output_contains!(status, &format!("- User install: {}", target.display()));
    assert_output_contains!(status, "- Install metadata: present");

    let removed = env.run_with_env(&["uninstall", "--yes"], &shell);
    assert_success!(removed);
    assert_output_contains!(removed, "uninstall completed");
    assert!(!target.exists());
    let rc_content = std::fs::read_to_string(&rc).unwrap();
    assert!(!rc_content.contains("krnr/bin"), "rc file:\n{}", rc_content);

    assert_output_contains!(env.run(&["status"]), "- User install: not found");
}

/// SCENARIO: Declining the confirmation leaves everything in place
#[cfg(unix)]
#[test]
fn scenario_install_declined() {
    let env = TestEnv::new();
    let fake_binary = env.work_path("krnr-build");
    std::fs::write(&fake_binary, b"binary").unwrap();
    let from = fake_binary.display().to_string();

    let result = env.run_with_stdin(&["install", "--user", "--from", &from], "n\nn\n");
    assert_success!(result);
    assert_output_contains!(result, "aborted");
    assert!(!env.home_dir.path().join("krnr").join("bin").join("krnr").exists());
}
