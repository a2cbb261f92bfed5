//! Test environment for isolated krnr runs.
//!
//! Every `TestEnv` owns a temporary HOME and data directory, so tests never
//! touch the real `~/.krnr` and can run in parallel.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Result of running a krnr CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Stdout lines parsed as JSON events.
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON ({e}): {l}"))
            })
            .collect()
    }
}

pub struct TestEnv {
    /// Temporary HOME
    pub home_dir: TempDir,
    /// Working directory for the child process
    pub work_dir: TempDir,
    krnr_bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home_dir: TempDir::new().expect("temp home"),
            work_dir: TempDir::new().expect("temp workdir"),
            krnr_bin: PathBuf::from(env!("CARGO_BIN_EXE_krnr")),
        }
    }

    /// `KRNR_HOME` for this environment.
    pub fn data_dir(&self) -> PathBuf {
        self.home_dir.path().join(".krnr")
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir().join("krnr.db")
    }

    pub fn work_path(&self, relative: &str) -> PathBuf {
        self.work_dir.path().join(relative)
    }

    /// Write `config.toml` into the data directory.
    pub fn write_config(&self, content: &str) {
        std::fs::create_dir_all(self.data_dir()).expect("create data dir");
        std::fs::write(self.data_dir().join("config.toml"), content).expect("write config");
    }

    fn command(&self, args: &[&str], env_vars: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(&self.krnr_bin);
        cmd.current_dir(self.work_dir.path())
            .args(args)
            .with_test_home(self.home_dir.path())
            .env("KRNR_HOME", self.data_dir())
            .env("KRNR_NO_COLOR", "1")
            .env_remove("KRNR_DB")
            .env_remove("KRNR_SHELL")
            .env_remove("KRNR_TIMEOUT")
            .env_remove("EDITOR");
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    /// Run with stdin closed, so any prompt reads end of input.
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let output = self
            .command(args, env_vars)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute krnr");
        to_result(output)
    }

    /// Run with `input` piped to stdin.
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> TestResult {
        let mut child = self
            .command(args, &[])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn krnr");
        child
            .stdin
            .take()
            .expect("piped stdin")
            .write_all(input.as_bytes())
            .expect("write stdin");
        to_result(child.wait_with_output().expect("wait for krnr"))
    }

    /// `krnr save <name> -c ...`, asserting success.
    pub fn save(&self, name: &str, commands: &[&str]) {
        let mut args = vec!["save", name];
        for c in commands {
            args.push("-c");
            args.push(c);
        }
        let result = self.run(&args);
        assert!(result.success, "save {name} failed: {}", result.stderr);
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Home-directory isolation that also works on Windows, where
/// `dirs::home_dir()` ignores `HOME`.
pub trait TestHomeExt {
    fn with_test_home(&mut self, home: &Path) -> &mut Self;
}

impl TestHomeExt for Command {
    fn with_test_home(&mut self, home: &Path) -> &mut Self {
        self.env("HOME", home)
            .env("USERPROFILE", home)
            .env("KRNR_TEST_HOME", home)
            .env("KRNR_TEST_SYSTEM_BIN", home.join("system-bin"))
            .env("KRNR_TEST_NO_SETX", "1")
    }
}
