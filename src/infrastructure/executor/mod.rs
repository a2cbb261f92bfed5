//! Command execution through the platform shell.

mod shell;

pub use shell::{shell_invocation, ShellExecutor};
