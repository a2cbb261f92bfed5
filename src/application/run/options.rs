//! Run options

/// Flags controlling one run of a command set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Print (when verbose) instead of executing.
    pub dry_run: bool,
    /// Ask `Run '<name>' now?` first.
    pub confirm: bool,
    pub verbose: bool,
    /// Run commands that match the denylist.
    pub force: bool,
    /// Do not echo `-> <command>` before each command.
    pub suppress_command: bool,
    /// Forward the child's stderr instead of discarding it.
    pub show_stderr: bool,
    /// Raw `--param name=value` flags.
    pub params: Vec<String>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_params<S: Into<String>>(mut self, params: impl IntoIterator<Item = S>) -> Self {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every command ran (or was printed, for a dry run).
    Completed { commands: usize },
    /// The confirmation prompt was declined.
    Declined,
}
