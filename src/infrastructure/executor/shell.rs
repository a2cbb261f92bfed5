//! Shell Executor
//!
//! Runs one command through the platform shell (`bash -c` or `cmd /C`),
//! streaming its output to the caller while enforcing a timeout.

use std::io::{Read, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

use crate::domain::ports::{CommandRunner, ExecError, ExecIo};
use crate::domain::services::prepare_command;
use crate::infrastructure::fs::find_executable;

/// How often the output loop wakes to check the deadline and interrupt flag.
const POLL: Duration = Duration::from_millis(100);

/// Real [`CommandRunner`] backed by a child shell process.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    pub dry_run: bool,
    pub verbose: bool,
    /// `pwsh`, `powershell`, or any shell accepting `-c`.
    pub shell: Option<String>,
    /// `None` waits forever.
    pub timeout: Option<Duration>,
    /// Set to `true` from a Ctrl-C handler to stop the running child.
    pub interrupted: Option<Arc<AtomicBool>>,
}

impl ShellExecutor {
    pub fn new(dry_run: bool, verbose: bool) -> Self {
        Self {
            dry_run,
            verbose,
            ..Default::default()
        }
    }

    pub fn with_shell(mut self, shell: Option<String>) -> Self {
        self.shell = shell.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = Some(flag);
        self
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Shell program and arguments for `command`.
pub fn shell_invocation(command: &str, override_shell: Option<&str>) -> (String, Vec<String>) {
    let with = |shell: &str, flag: &str| (shell.to_string(), vec![flag.to_string(), command.to_string()]);

    match override_shell.map(str::trim).filter(|s| !s.is_empty()) {
        Some("pwsh") => with("pwsh", "-Command"),
        Some("powershell") if cfg!(windows) => {
            let shell = ["powershell", "pwsh"]
                .into_iter()
                .find(|s| find_executable(s).is_some())
                .unwrap_or("powershell");
            with(shell, "-Command")
        }
        Some("powershell") => with("pwsh", "-Command"),
        Some(other) => with(other, "-c"),
        None if cfg!(windows) => with("cmd", "/C"),
        None => with("bash", "-c"),
    }
}

enum Chunk {
    Out(Vec<u8>),
    Err(Vec<u8>),
}

fn pump(mut pipe: impl Read, tx: Sender<Chunk>, wrap: fn(Vec<u8>) -> Chunk) {
    let mut buf = [0u8; 4096];
    loop {
        match pipe.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if tx.send(wrap(buf[..n].to_vec())).is_err() {
                    break;
                }
            }
        }
    }
}

fn feed_stdin(mut stdin: ChildStdin, data: Vec<u8>) {
    thread::spawn(move || {
        let _ = stdin.write_all(&data);
    });
}

fn kill(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl CommandRunner for ShellExecutor {
    fn execute(&self, command: &str, cwd: Option<&Path>, io: ExecIo<'_>) -> Result<(), ExecError> {
        let command = prepare_command(command)?;

        if self.dry_run {
            if self.verbose {
                writeln!(io.stdout, "dry-run: {}", command)?;
            }
            return Ok(());
        }

        let (shell, args) = shell_invocation(&command, self.shell.as_deref());
        let program = find_executable(&shell).ok_or_else(|| ExecError::ShellNotFound(shell.clone()))?;

        let mut cmd = Command::new(&program);
        cmd.args(&args).stdout(Stdio::piped()).stderr(Stdio::piped());
        cmd.stdin(if io.stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::inherit()
        });
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
            shell: shell.clone(),
            source,
        })?;

        if let (Some(reader), Some(pipe)) = (io.stdin, child.stdin.take()) {
            let mut data = Vec::new();
            reader.read_to_end(&mut data)?;
            feed_stdin(pipe, data);
        }

        // Readers are detached: a backgrounded grandchild may hold the pipes
        // open after the shell exits or is killed.
        let (tx, rx) = mpsc::channel();
        if let Some(out) = child.stdout.take() {
            let tx = tx.clone();
            thread::spawn(move || pump(out, tx, Chunk::Out));
        }
        if let Some(err) = child.stderr.take() {
            let tx = tx.clone();
            thread::spawn(move || pump(err, tx, Chunk::Err));
        }
        drop(tx);

        let deadline = self.timeout.map(|t| Instant::now() + t);
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();
        let mut stderr_sink = io.stderr;

        loop {
            if self.is_interrupted() {
                kill(&mut child);
                return Err(ExecError::Interrupted);
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                kill(&mut child);
                return Err(self.timed_out());
            }
            match rx.recv_timeout(POLL) {
                Ok(Chunk::Out(bytes)) => {
                    io.stdout.write_all(&display_bytes(&bytes))?;
                    io.stdout.flush()?;
                    stdout_buf.extend_from_slice(&bytes);
                }
                Ok(Chunk::Err(bytes)) => {
                    if let Some(sink) = stderr_sink.as_mut() {
                        sink.write_all(&display_bytes(&bytes))?;
                        sink.flush()?;
                    }
                    stderr_buf.extend_from_slice(&bytes);
                }
                Err(RecvTimeoutError::Timeout) => {
                    // Output may stay open after the shell is gone; stop waiting then.
                    if child.try_wait()?.is_some() {
                        break;
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        let status = match deadline {
            Some(d) => match child.wait_timeout(d.saturating_duration_since(Instant::now()))? {
                Some(status) => status,
                None => {
                    kill(&mut child);
                    return Err(self.timed_out());
                }
            },
            None => child.wait()?,
        };

        // Drain anything that arrived between the last poll and exit.
        while let Ok(chunk) = rx.try_recv() {
            match chunk {
                Chunk::Out(bytes) => {
                    io.stdout.write_all(&display_bytes(&bytes))?;
                    stdout_buf.extend_from_slice(&bytes);
                }
                Chunk::Err(bytes) => {
                    if let Some(sink) = stderr_sink.as_mut() {
                        sink.write_all(&display_bytes(&bytes))?;
                    }
                    stderr_buf.extend_from_slice(&bytes);
                }
            }
        }

        check_status(status, &stdout_buf, &stderr_buf, shell, args)
    }
}

impl ShellExecutor {
    fn timed_out(&self) -> ExecError {
        ExecError::TimedOut(self.timeout.map(|t| t.as_secs()).unwrap_or_default())
    }
}

/// Exit 1 with output counts as success, the way `grep` reports "no more matches".
fn check_status(
    status: ExitStatus,
    stdout: &[u8],
    stderr: &[u8],
    shell: String,
    args: Vec<String>,
) -> Result<(), ExecError> {
    if status.success() || (status.code() == Some(1) && !stdout.is_empty()) {
        return Ok(());
    }
    Err(ExecError::Failed {
        status: status.to_string(),
        shell,
        args,
        stdout: String::from_utf8_lossy(stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(stderr).trim().to_string(),
    })
}

#[cfg(windows)]
fn display_bytes(bytes: &[u8]) -> Vec<u8> {
    unescape_quoted_output(&String::from_utf8_lossy(bytes)).into_bytes()
}

#[cfg(not(windows))]
fn display_bytes(bytes: &[u8]) -> Vec<u8> {
    bytes.to_vec()
}

/// Undo the `\"HELLO\"` style escaping some Windows shells apply to echoed
/// strings, and drop quotes wrapping an entire line.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn unescape_quoted_output(text: &str) -> String {
    let unescaped = text.replace("\\\"", "\"");
    let trimmed = unescaped.trim_end_matches(['\r', '\n']);
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        let suffix = &unescaped[trimmed.len()..];
        format!("{}{}", &trimmed[1..trimmed.len() - 1], suffix)
    } else {
        unescaped
    }
}
