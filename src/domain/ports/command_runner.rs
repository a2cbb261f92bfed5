//! CommandRunner port
//!
//! Executes a single shell command. The run use case only talks to this
//! trait, so tests can substitute a recording fake.

use std::io::{Read, Write};
use std::path::Path;

use crate::domain::services::CommandTextError;

/// Streams handed to a runner for one command.
pub struct ExecIo<'a> {
    pub stdout: &'a mut dyn Write,
    /// `None` discards the child's stderr.
    pub stderr: Option<&'a mut dyn Write>,
    /// `None` inherits the parent's stdin.
    pub stdin: Option<&'a mut dyn Read>,
}

pub trait CommandRunner {
    fn execute(&self, command: &str, cwd: Option<&Path>, io: ExecIo<'_>) -> Result<(), ExecError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error(transparent)]
    InvalidCommand(#[from] CommandTextError),

    #[error("shell not found in PATH: {0}")]
    ShellNotFound(String),

    #[error("command timed out after {0}s")]
    TimedOut(u64),

    #[error("command failed: {status} (shell={shell} args={args:?}{})", detail(.stdout, .stderr))]
    Failed {
        status: String,
        shell: String,
        args: Vec<String>,
        stdout: String,
        stderr: String,
    },

    #[error("interrupted")]
    Interrupted,

    #[error("spawn {shell}: {source}")]
    Spawn {
        shell: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn detail(stdout: &str, stderr: &str) -> String {
    if stdout.is_empty() && stderr.is_empty() {
        String::new()
    } else {
        format!(" stdout={:?} stderr={:?}", stdout, stderr)
    }
}
