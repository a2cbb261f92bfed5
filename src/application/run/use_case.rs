//! Run Use Case
//!
//! For each command of a set, in order:
//! 1. Resolve `{{param}}` placeholders (flags, then prompts)
//! 2. Build a redacted form for display
//! 3. Check the denylist
//! 4. Echo and execute
//!
//! The first failure stops the run.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::ports::{CommandRunner, CommandSetRepository, ExecIo, Prompter};
use crate::domain::policies::{is_secret_param_name, CommandPolicy};
use crate::domain::value_objects::{apply_params, find_params, parse_param_flag, Params};
use crate::error::{KrnrError, KrnrResult};

use super::options::{RunOptions, RunOutcome};

pub struct RunUseCase<'a, R, X, P>
where
    R: CommandSetRepository,
    X: CommandRunner,
    P: Prompter + ?Sized,
{
    repo: &'a R,
    runner: &'a X,
    prompter: &'a P,
    policy: CommandPolicy,
    interrupted: Option<Arc<AtomicBool>>,
}

impl<'a, R, X, P> RunUseCase<'a, R, X, P>
where
    R: CommandSetRepository,
    X: CommandRunner,
    P: Prompter + ?Sized,
{
    pub fn new(repo: &'a R, runner: &'a X, prompter: &'a P) -> Self {
        Self {
            repo,
            runner,
            prompter,
            policy: CommandPolicy::default(),
            interrupted: None,
        }
    }

    pub fn with_policy(mut self, policy: CommandPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Flag checked before each command; set it from a Ctrl-C handler.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = Some(flag);
        self
    }

    /// Run the set called `name`. `out` receives command echoes and the
    /// child's stdout; `err` receives its stderr when `show_stderr` is set.
    pub fn execute(
        &self,
        name: &str,
        options: &RunOptions,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> KrnrResult<RunOutcome> {
        let set = self
            .repo
            .get_command_set_by_name(name)?
            .ok_or_else(|| KrnrError::NotFound(name.to_string()))?;

        if options.confirm && !self.prompter.confirm(&format!("Run '{}' now?", name))? {
            writeln!(out, "aborted")?;
            return Ok(RunOutcome::Declined);
        }

        let mut params = Params::new();
        for flag in &options.params {
            let (key, value) = parse_param_flag(flag)?;
            params.insert(key, value);
        }

        for command in &set.commands {
            if self.is_interrupted() {
                return Err(KrnrError::Interrupted);
            }

            let (real, shown) = self.resolve(&command.command, &mut params)?;

            if let Err(violation) = self.policy.check_allowed(&real) {
                if !options.force {
                    return Err(KrnrError::Refused {
                        command: shown,
                        reason: violation.to_string(),
                    });
                }
            }

            if !options.suppress_command {
                writeln!(out, "-> {}", shown)?;
            }

            // A dry run only ever prints, so it gets the redacted text.
            let text = if options.dry_run { &shown } else { &real };
            let io = ExecIo {
                stdout: &mut *out,
                stderr: if options.show_stderr {
                    Some(&mut *err)
                } else {
                    None
                },
                stdin: None,
            };
            self.runner.execute(text, None, io)?;
        }

        if !options.dry_run {
            self.repo.touch_last_run(set.id)?;
        }
        Ok(RunOutcome::Completed {
            commands: set.commands.len(),
        })
    }

    /// Substituted command and its redacted display form.
    fn resolve(&self, command: &str, params: &mut Params) -> KrnrResult<(String, String)> {
        let required = find_params(command);
        if required.is_empty() {
            return Ok((command.to_string(), command.to_string()));
        }

        for name in &required {
            if params.contains(name) {
                continue;
            }
            let value = self.prompter.ask(&format!("Value for parameter {}", name))?;
            if value.is_empty() {
                return Err(KrnrError::MissingParamValue(name.clone()));
            }
            params.set(name.clone(), value);
        }

        let real = apply_params(command, params.values())?;
        let shown = apply_params(command, &params.redacted(is_secret_param_name))
            .unwrap_or_else(|_| real.clone());
        Ok((real, shown))
    }

    fn is_interrupted(&self) -> bool {
        self.interrupted
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}
