//! `--json` emits one event object per line.

use crate::common::*;
use crate::{assert_failure, assert_success};

#[test]
fn contract_json_list_carries_sets() {
    let env = TestEnv::new();
    env.save("alpha", &["echo a"]);
    assert_success!(env.run(&["tag", "add", "alpha", "ops"]));

    let result = env.run(&["--json", "list"]);
    assert_success!(result);
    let events = result.json_lines();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "data");
    assert_eq!(events[0]["command"], "list");
    assert_eq!(events[0]["sets"][0]["name"], "alpha");
    assert_eq!(events[0]["sets"][0]["tags"][0], "ops");
}

#[test]
fn contract_json_describe() {
    let env = TestEnv::new();
    env.save("beta", &["echo b", "echo c"]);

    let result = env.run(&["describe", "beta", "--json"]);
    assert_success!(result);
    let event = &result.json_lines()[0];
    assert_eq!(event["command"], "describe");
    assert_eq!(event["set"]["name"], "beta");
    assert_eq!(event["set"]["commands"][0]["command"], "echo b");
    assert_eq!(event["set"]["commands"][1]["position"], 2);
}

#[test]
fn contract_json_version() {
    let env = TestEnv::new();
    let result = env.run(&["--json", "version"]);
    assert_success!(result);
    let event = &result.json_lines()[0];
    assert_eq!(event["command"], "version");
    assert!(event["version"].as_str().is_some_and(|v| !v.is_empty()));
}

#[test]
fn contract_json_errors_have_kind() {
    let env = TestEnv::new();
    let result = env.run(&["--json", "describe", "ghost"]);
    assert_failure!(result);
    assert_eq!(result.exit_code, 1);

    let event = &result.json_lines()[0];
    assert_eq!(event["event"], "error");
    assert_eq!(event["kind"], "not_found");
    assert_eq!(event["message"], "command set not found: ghost");
}

#[test]
fn contract_json_refusal_kind() {
    let env = TestEnv::new();
    env.save("danger", &["rm -rf /"]);

    let result = env.run(&["--json", "run", "danger"]);
    assert_failure!(result);
    assert_eq!(result.json_lines()[0]["kind"], "refused");
}

#[cfg(unix)]
#[test]
fn contract_json_run_captures_output() {
    let env = TestEnv::new();
    env.save("hi", &["echo hi"]);

    let result = env.run(&["--json", "run", "hi"]);
    assert_success!(result);
    let events = result.json_lines();
    assert_eq!(events.len(), 1, "stdout:\n{}", result.stdout);
    assert_eq!(events[0]["name"], "hi");
    assert_eq!(events[0]["dry_run"], false);
    assert!(events[0]["output"].as_str().unwrap().contains("hi\n"));
    assert_eq!(events[0]["stderr"], "");
}

#[cfg(unix)]
#[test]
fn contract_json_run_captures_stderr_when_shown() {
    let env = TestEnv::new();
    env.save("noisy", &["echo visible; echo complaint 1>&2"]);

    let hidden = env.run(&["--json", "run", "noisy"]);
    assert_success!(hidden);
    assert_eq!(hidden.json_lines()[0]["stderr"], "");

    let shown = env.run(&["--json", "run", "noisy", "--show-stderr"]);
    assert_success!(shown);
    let events = shown.json_lines();
    assert_eq!(events.len(), 1, "stdout:\n{}", shown.stdout);
    assert_eq!(events[0]["stderr"], "complaint\n");
    assert!(events[0]["output"].as_str().unwrap().contains("visible\n"));
    assert!(shown.stderr.is_empty(), "stderr:\n{}", shown.stderr);
}

#[test]
fn contract_json_whoami_show_without_identity() {
    let env = TestEnv::new();
    let result = env.run(&["--json", "whoami", "show"]);
    assert_success!(result);
    let event = &result.json_lines()[0];
    assert_eq!(event["action"], "show");
    assert!(event["profile"].is_null());
}
