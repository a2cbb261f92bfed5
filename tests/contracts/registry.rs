//! Saving, listing, editing and versioning command sets.

use crate::common::*;
use crate::{assert_failure, assert_output_contains, assert_success};

mod save {
    use super::*;

    #[test]
    fn contract_save_reports_command_count() {
        let env = TestEnv::new();
        let result = env.run(&["save", "hello", "-d", "greets", "-c", "echo hi", "-c", "echo bye"]);
        assert_success!(result);
        assert_eq!(result.stdout.trim(), "saved 'hello' with 2 commands");
    }

    #[test]
    fn contract_save_drops_blank_commands() {
        let env = TestEnv::new();
        let result = env.run(&["save", "blanks", "-c", "echo a", "-c", "   "]);
        assert_success!(result);
        assert_output_contains!(result, "with 1 commands");
    }

    #[test]
    fn contract_duplicate_name_reprompts_on_stdin() {
        let env = TestEnv::new();
        env.save("dup", &["echo one"]);

        let result = env.run_with_stdin(&["save", "dup", "-c", "echo two"], "dup2\n");
        assert_success!(result);
        assert_output_contains!(result, "name 'dup' already exists; enter a new name: ");
        assert_output_contains!(result, "saved 'dup2' with 1 commands");
    }

    #[test]
    fn contract_duplicate_name_with_blank_answer_fails() {
        let env = TestEnv::new();
        env.save("dup", &["echo one"]);

        let result = env.run_with_stdin(&["save", "dup", "-c", "echo two"], "\n");
        assert_failure!(result);
        assert_output_contains!(result, "name cannot be empty");
    }

    #[test]
    fn contract_duplicate_name_at_eof_aborts() {
        let env = TestEnv::new();
        env.save("dup", &["echo one"]);

        let result = env.run(&["save", "dup", "-c", "echo two"]);
        assert_failure!(result);
        assert_eq!(result.exit_code, 1);
    }
}

mod record {
    use super::*;

    #[test]
    fn contract_record_reads_until_sentinel() {
        let env = TestEnv::new();
        let result = env.run_with_stdin(
            &["record", "rec"],
            "echo one\n# comment\n\necho two\n:end\necho never\n",
        );
        assert_success!(result);
        assert_output_contains!(result, "Enter commands, one per line.");
        assert_output_contains!(result, "saved 'rec' with 2 commands");

        let described = env.run(&["describe", "rec"]);
        assert_output_contains!(described, "1: echo one");
        assert_output_contains!(described, "2: echo two");
        assert!(!described.stdout.contains("never"));
    }

    #[test]
    fn contract_record_with_no_input_aborts() {
        let env = TestEnv::new();
        let result = env.run_with_stdin(&["record", "empty"], "");
        assert_success!(result);
        assert_output_contains!(result, "no commands recorded; aborting");
        assert_output_contains!(env.run(&["describe", "empty"]), "not found");
    }
}

mod list_and_describe {
    use super::*;

    #[test]
    fn contract_list_prints_dash_lines() {
        let env = TestEnv::new();
        env.save("alpha", &["echo a"]);
        env.save("beta", &["echo b"]);

        let result = env.run(&["list"]);
        assert_success!(result);
        assert!(result.stdout.contains("- alpha\n"), "got:\n{}", result.stdout);
        assert!(result.stdout.contains("- beta\n"), "got:\n{}", result.stdout);
    }

    #[test]
    fn contract_list_filters_by_text_and_fuzzy() {
        let env = TestEnv::new();
        env.save("deploy-web", &["make deploy"]);
        env.save("backup", &["tar czf backup.tgz ."]);

        let plain = env.run(&["list", "--filter", "tar czf"]);
        assert_success!(plain);
        assert_eq!(plain.stdout.trim(), "- backup");

        let fuzzy = env.run(&["list", "--filter", "dplyw", "--fuzzy"]);
        assert_success!(fuzzy);
        assert_eq!(fuzzy.stdout.trim(), "- deploy-web");
    }

    #[test]
    fn contract_describe_shows_commands_in_order() {
        let env = TestEnv::new();
        let result = env.run(&[
            "save", "ship", "-d", "ship it", "-a", "Ada", "-e", "ada@example.com", "-c", "git pull",
            "-c", "make",
        ]);
        assert_success!(result);

        let described = env.run(&["describe", "ship"]);
        assert_success!(described);
        assert!(described.stdout.starts_with("Name: ship\n"));
        assert_output_contains!(described, "Description: ship it");
        assert_output_contains!(described, "Author: Ada <ada@example.com>");
        assert_output_contains!(described, "Commands:\n1: git pull\n2: make\n");
    }

    #[test]
    fn contract_describe_missing_set_fails() {
        let env = TestEnv::new();
        let result = env.run(&["describe", "ghost"]);
        assert_failure!(result);
        assert_output_contains!(result, "command set not found: ghost");
    }
}

mod edit_and_delete {
    use super::*;

    #[test]
    fn contract_edit_with_flags_replaces_commands() {
        let env = TestEnv::new();
        env.save("e", &["echo old"]);

        let result = env.run(&["edit", "e", "-c", "echo new", "-c", "echo newer"]);
        assert_success!(result);
        assert_eq!(result.stdout.trim(), "updated 'e' with 2 commands");

        let described = env.run(&["describe", "e"]);
        assert_output_contains!(described, "1: echo new\n2: echo newer\n");
    }

    #[cfg(unix)]
    #[test]
    fn contract_edit_through_editor_ignores_comments() {
        let env = TestEnv::new();
        env.save("e", &["echo old"]);

        let script = env.work_path("fake-editor.sh");
        std::fs::write(
            &script,
            "#!/bin/sh\nprintf '# note\\n\\necho edited\\n' > \"$1\"\n",
        )
        .unwrap();
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let editor = script.display().to_string();
        let result = env.run_with_env(&["edit", "e"], &[("EDITOR", editor.as_str())]);
        assert_success!(result);
        assert_eq!(result.stdout.trim(), "updated 'e' with 1 commands");
        assert_output_contains!(env.run(&["describe", "e"]), "1: echo edited");
    }

    #[test]
    fn contract_delete_without_confirmation_aborts() {
        let env = TestEnv::new();
        env.save("d", &["echo"]);

        let result = env.run_with_stdin(&["delete", "d"], "n\n");
        assert_success!(result);
        assert_output_contains!(result, "Delete 'd' permanently? [y/N]: ");
        assert_output_contains!(result, "aborted");
        assert_success!(env.run(&["describe", "d"]));
    }

    #[test]
    fn contract_delete_with_yes() {
        let env = TestEnv::new();
        env.save("d", &["echo"]);

        let result = env.run(&["delete", "d", "--yes"]);
        assert_success!(result);
        assert_eq!(result.stdout.trim(), "deleted 'd'");
        assert_failure!(env.run(&["describe", "d"]));
    }
}

mod tags {
    use super::*;

    #[test]
    fn contract_tag_add_list_remove() {
        let env = TestEnv::new();
        env.save("t", &["echo"]);

        let added = env.run(&["tag", "add", "t", "prod"]);
        assert_success!(added);
        assert_eq!(added.stdout.trim(), "added tag 'prod' to 't'");
        assert_success!(env.run(&["tag", "add", "t", "alpha"]));

        let listed = env.run(&["tag", "list", "t"]);
        assert_eq!(listed.stdout, "- alpha\n- prod\n");

        let by_tag = env.run(&["list", "--tag", "prod"]);
        assert_eq!(by_tag.stdout.trim(), "- t");

        let removed = env.run(&["tag", "remove", "t", "prod"]);
        assert_eq!(removed.stdout.trim(), "removed tag 'prod' from 't'");
        assert_eq!(env.run(&["tag", "list", "t"]).stdout, "- alpha\n");
    }
}

mod history {
    use super::*;

    #[test]
    fn contract_history_lists_versions_newest_first() {
        let env = TestEnv::new();
        env.save("h", &["echo v1"]);
        assert_success!(env.run(&["edit", "h", "-c", "echo v2"]));

        let result = env.run(&["history", "h"]);
        assert_success!(result);
        let lines: Vec<&str> = result.stdout.lines().collect();
        assert_eq!(lines.len(), 2, "got:\n{}", result.stdout);
        assert!(lines[0].starts_with("v2\t"));
        assert!(lines[0].contains("\tupdate\t"));
        assert!(lines[1].starts_with("v1\t"));
        assert!(lines[1].contains("\tcreate\t"));
    }

    #[test]
    fn contract_history_of_unknown_set() {
        let env = TestEnv::new();
        let result = env.run(&["history", "nope"]);
        assert_success!(result);
        assert_eq!(result.stdout.trim(), "no history for nope");
    }

    #[test]
    fn contract_rollback_restores_and_shows_diff() {
        let env = TestEnv::new();
        env.save("r", &["echo one", "echo two"]);
        assert_success!(env.run(&["edit", "r", "-c", "echo three"]));

        let result = env.run(&["rollback", "r", "--version", "1"]);
        assert_success!(result);
        assert_output_contains!(result, "--- current\n+++ v1\n");
        assert_output_contains!(result, "- echo three");
        assert_output_contains!(result, "+ echo one");
        assert!(result.stdout.trim_end().ends_with("rolled back r to v1"));

        let described = env.run(&["describe", "r"]);
        assert_output_contains!(described, "1: echo one\n2: echo two\n");

        let history = env.run(&["history", "r"]);
        assert!(history.stdout.lines().next().unwrap().contains("\trollback\t"));
    }

    #[test]
    fn contract_rollback_rejects_non_positive_versions() {
        let env = TestEnv::new();
        env.save("r", &["echo"]);

        let zero = env.run(&["rollback", "r", "--version", "0"]);
        assert_failure!(zero);
        assert_output_contains!(zero, "--version must be a positive integer");

        let missing = env.run(&["rollback", "r", "--version", "9"]);
        assert_failure!(missing);
        assert_output_contains!(missing, "version 9 not found for r");
    }
}
