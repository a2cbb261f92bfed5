//! Running command sets: echo, parameters, the denylist and dry runs.

use crate::common::*;
use crate::{assert_failure, assert_output_contains, assert_output_not_contains, assert_success};

#[cfg(unix)]
mod execution {
    use super::*;

    #[test]
    fn contract_run_echoes_then_executes_in_order() {
        let env = TestEnv::new();
        env.save("greet", &["echo first", "echo second"]);

        let result = env.run(&["run", "greet"]);
        assert_success!(result);
        assert_eq!(result.stdout, "-> echo first\nfirst\n-> echo second\nsecond\n");
    }

    #[test]
    fn contract_suppress_command_hides_echo() {
        let env = TestEnv::new();
        env.save("quiet", &["echo only-output"]);

        let result = env.run(&["run", "quiet", "--suppress-command"]);
        assert_success!(result);
        assert_eq!(result.stdout, "only-output\n");
    }

    #[test]
    fn contract_first_failure_stops_the_run() {
        let env = TestEnv::new();
        env.save("fails", &["echo before", "exit 3", "echo after"]);

        let result = env.run(&["run", "fails"]);
        assert_failure!(result);
        assert_output_contains!(result, "before");
        assert_output_not_contains!(result, "after");
    }

    #[test]
    fn contract_stderr_is_hidden_unless_requested() {
        let env = TestEnv::new();
        env.save("noisy", &["echo oops 1>&2"]);

        let hidden = env.run(&["run", "noisy", "--suppress-command"]);
        assert_success!(hidden);
        assert_output_not_contains!(hidden, "oops");
        assert!(hidden.stderr.is_empty(), "stderr:\n{}", hidden.stderr);

        let shown = env.run(&["run", "noisy", "--show-stderr"]);
        assert_success!(shown);
        assert!(shown.stderr.contains("oops"), "stderr:\n{}", shown.stderr);
    }

    #[test]
    fn contract_config_can_show_stderr() {
        let env = TestEnv::new();
        env.write_config("[run]\nshow_stderr = true\n");
        env.save("noisy", &["echo oops 1>&2"]);

        let result = env.run(&["run", "noisy"]);
        assert_success!(result);
        assert!(result.stderr.contains("oops"), "stderr:\n{}", result.stderr);
    }

    #[test]
    fn contract_timeout_stops_long_commands() {
        let env = TestEnv::new();
        env.save("slow", &["sleep 5"]);

        let result = env.run_with_env(&["run", "slow"], &[("KRNR_TIMEOUT", "1")]);
        assert_failure!(result);
        assert_output_contains!(result, "timed out");
    }
}

#[cfg(unix)]
mod params {
    use super::*;

    #[test]
    fn contract_params_are_substituted() {
        let env = TestEnv::new();
        env.save("hi", &["echo hello {{who}}"]);

        let result = env.run(&["run", "hi", "--param", "who=world"]);
        assert_success!(result);
        assert_eq!(result.stdout, "-> echo hello world\nhello world\n");
    }

    #[test]
    fn contract_env_params_read_the_environment() {
        let env = TestEnv::new();
        env.save("hi", &["echo {{who}}"]);

        let result = env.run_with_env(
            &["run", "hi", "--param", "who=env:KRNR_TEST_WHO"],
            &[("KRNR_TEST_WHO", "from-env")],
        );
        assert_success!(result);
        assert_output_contains!(result, "from-env");
    }

    #[test]
    fn contract_secret_params_are_redacted_in_echo() {
        let env = TestEnv::new();
        env.save("auth", &["echo {{api_token}} >/dev/null"]);

        let result = env.run(&["run", "auth", "--param", "api_token=hunter2"]);
        assert_success!(result);
        assert_output_contains!(result, "-> echo <redacted> >/dev/null");
        assert_output_not_contains!(result, "hunter2");
    }

    #[test]
    fn contract_prompted_params_read_stdin() {
        let env = TestEnv::new();
        env.save("hi", &["echo hello {{who}}"]);

        let result = env.run_with_stdin(&["run", "hi"], "piped\n");
        assert_success!(result);
        assert_output_contains!(result, "Value for parameter who: ");
        assert_output_contains!(result, "hello piped");
    }

    #[test]
    fn contract_missing_param_value_fails() {
        let env = TestEnv::new();
        env.save("hi", &["echo hello {{who}}"]);

        let result = env.run(&["run", "hi"]);
        assert_failure!(result);
        assert_output_contains!(result, "missing value for parameter who");
    }

    #[test]
    fn contract_malformed_param_flag_fails() {
        let env = TestEnv::new();
        env.save("hi", &["echo {{who}}"]);

        let result = env.run(&["run", "hi", "--param", "novalue"]);
        assert_failure!(result);
        assert_output_contains!(result, "invalid --param value");
    }
}

mod safety {
    use super::*;

    #[test]
    fn contract_denylisted_commands_are_refused() {
        let env = TestEnv::new();
        env.save("danger", &["rm -rf /"]);

        let result = env.run(&["run", "danger"]);
        assert_failure!(result);
        assert_output_contains!(result, "refusing to run potentially dangerous command 'rm -rf /'");
        assert_output_contains!(result, "use --force to override");
    }

    #[test]
    fn contract_extra_deny_patterns_from_config() {
        let env = TestEnv::new();
        env.write_config("[security]\nextra_deny = ['\\bshutdown\\b']\n");
        env.save("off", &["shutdown now"]);

        let result = env.run(&["run", "off", "--dry-run"]);
        assert_failure!(result);
        assert_output_contains!(result, "refusing to run");
    }

    #[test]
    fn contract_dry_run_does_not_execute() {
        let env = TestEnv::new();
        let marker = env.work_path("touched");
        let command = format!("touch {}", marker.display());
        env.save("dry", &[command.as_str()]);

        let result = env.run(&["run", "dry", "--dry-run"]);
        assert_success!(result);
        assert_output_contains!(result, "-> touch");
        assert!(!marker.exists(), "dry run must not execute commands");
    }

    #[test]
    fn contract_dry_run_verbose_prints_plan() {
        let env = TestEnv::new();
        env.save("dry", &["echo planned"]);

        let result = env.run(&["run", "dry", "--dry-run", "-v"]);
        assert_success!(result);
        assert_output_contains!(result, "dry-run: echo planned");
    }

    #[test]
    fn contract_confirm_declined_prints_aborted() {
        let env = TestEnv::new();
        env.save("ask", &["echo never"]);

        let result = env.run_with_stdin(&["run", "ask", "--confirm"], "n\n");
        assert_success!(result);
        assert_output_contains!(result, "Run 'ask' now? [y/N]: ");
        assert_output_contains!(result, "aborted");
        assert_output_not_contains!(result, "-> echo never");
    }

    #[test]
    fn contract_running_unknown_set_fails() {
        let env = TestEnv::new();
        let result = env.run(&["run", "ghost"]);
        assert_failure!(result);
        assert_output_contains!(result, "command set not found: ghost");
    }
}
