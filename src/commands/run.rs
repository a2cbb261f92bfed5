use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use anyhow::Result;
use krnr::domain::policies::CommandPolicy;
use krnr::domain::ports::{NoPrompt, Prompter};
use krnr::{RunOptions, RunOutcome, RunUseCase, ShellExecutor};

use super::Session;
use crate::ui::json::emit_data;
use crate::ui::output;
use crate::ui::prompt::prompter_for;

/// `krnr run` flags as parsed.
#[derive(Debug, Clone, Default)]
pub struct RunFlags {
    pub dry_run: bool,
    pub confirm: bool,
    pub force: bool,
    pub suppress_command: bool,
    pub show_stderr: bool,
    pub shell: Option<String>,
    pub params: Vec<String>,
}

/// Process-wide Ctrl-C flag. The handler can only be installed once, so
/// every run shares it and clears it before starting.
pub fn interrupt_flag() -> Arc<AtomicBool> {
    static FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();
    FLAG.get_or_init(|| {
        let flag = Arc::new(AtomicBool::new(false));
        let handler_flag = Arc::clone(&flag);
        // Without a handler Ctrl-C simply kills the process.
        let _ = ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst));
        flag
    })
    .clone()
}

pub fn executor_for(session: &Session, flags: &RunFlags, interrupt: Arc<AtomicBool>) -> ShellExecutor {
    let run = &session.config.run;
    let timeout = (run.timeout_secs > 0).then(|| Duration::from_secs(run.timeout_secs));
    ShellExecutor::new(flags.dry_run, session.ui.verbose > 0)
        .with_shell(flags.shell.clone().or_else(|| run.shell.clone()))
        .with_timeout(timeout)
        .with_interrupt(interrupt)
}

pub fn options_for(session: &Session, flags: &RunFlags) -> RunOptions {
    RunOptions {
        dry_run: flags.dry_run,
        confirm: flags.confirm,
        verbose: session.ui.verbose > 0,
        force: flags.force,
        suppress_command: flags.suppress_command,
        show_stderr: flags.show_stderr || session.config.run.show_stderr,
        params: flags.params.clone(),
    }
}

/// Run `name`, writing echoes and command output to `out`/`err`.
pub fn run_set(
    session: &Session,
    name: &str,
    flags: &RunFlags,
    prompter: &dyn Prompter,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<RunOutcome> {
    let repo = session.open_repo()?;
    let interrupt = interrupt_flag();
    interrupt.store(false, Ordering::SeqCst);

    let executor = executor_for(session, flags, Arc::clone(&interrupt));
    output::debug(
        &session.ui,
        format!(
            "shell: {}, timeout: {}s",
            executor.shell.as_deref().unwrap_or(krnr::config::default_shell_hint()),
            session.config.run.timeout_secs
        ),
    );

    let policy = CommandPolicy::with_extra(&session.config.security.extra_deny)
        .map_err(krnr::KrnrError::from)?;
    let use_case = RunUseCase::new(&repo, &executor, prompter)
        .with_policy(policy)
        .with_interrupt(interrupt);

    let started = Instant::now();
    let outcome = use_case.execute(name, &options_for(session, flags), out, err)?;
    output::debug(&session.ui, format!("run finished in {:?}", started.elapsed()));
    Ok(outcome)
}

pub fn cmd_run(session: &Session, name: &str, flags: RunFlags) -> Result<()> {
    if session.ui.json {
        // Prompts would corrupt the NDJSON stream; missing values are errors.
        let mut captured = Vec::new();
        let mut captured_err = Vec::new();
        let outcome = run_set(
            session,
            name,
            &flags,
            &NoPrompt::default(),
            &mut captured,
            &mut captured_err,
        )?;
        let commands = match outcome {
            RunOutcome::Completed { commands } => commands,
            RunOutcome::Declined => 0,
        };
        emit_data(
            "run",
            serde_json::json!({
                "name": name,
                "dry_run": flags.dry_run,
                "commands": commands,
                "output": String::from_utf8_lossy(&captured),
                // Empty unless stderr is shown (`--show-stderr` or `[run] show_stderr`).
                "stderr": String::from_utf8_lossy(&captured_err),
            }),
        )?;
        return Ok(());
    }

    let prompter = prompter_for(&session.ui);
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    run_set(session, name, &flags, prompter.as_ref(), &mut stdout, &mut stderr)?;
    stdout.flush()?;
    Ok(())
}
