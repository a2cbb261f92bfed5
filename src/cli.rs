use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// krnr is a global, SQLite-backed command runner
#[derive(Parser, Debug)]
#[command(name = "krnr")]
#[command(author, version = krnr::version(), about, long_about = "krnr provides a global registry of named terminal workflows")]
#[command(after_help = "Run 'krnr' without arguments in a terminal for the interactive menu.")]
pub struct Cli {
    /// Emit one JSON object per line
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Show the author handle
    #[arg(long, global = true, hide = true)]
    pub whoami: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a named command set
    Save {
        name: String,

        /// Description for the command set
        #[arg(short, long)]
        description: Option<String>,

        /// Command to add to the set (repeatable)
        #[arg(short = 'c', long = "command")]
        commands: Vec<String>,

        /// Author name (overrides the stored whoami)
        #[arg(short, long)]
        author: Option<String>,

        /// Author email
        #[arg(short = 'e', long)]
        author_email: Option<String>,
    },

    /// Record commands from stdin into a new set
    Record {
        name: String,

        /// Description for the recorded command set
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List saved command sets
    List {
        /// Only sets with this tag
        #[arg(long)]
        tag: Option<String>,

        /// Text search over names, descriptions and commands
        #[arg(long)]
        filter: Option<String>,

        /// Fuzzy matching for --filter
        #[arg(long, requires = "filter")]
        fuzzy: bool,
    },

    /// Show details for a command set
    Describe { name: String },

    /// Run a command set
    Run {
        name: String,

        /// Print the commands without executing them
        #[arg(long)]
        dry_run: bool,

        /// Ask before running
        #[arg(long)]
        confirm: bool,

        /// Override the denylist
        #[arg(long)]
        force: bool,

        /// Do not echo each command before it runs
        #[arg(long)]
        suppress_command: bool,

        /// Show the commands' stderr
        #[arg(long)]
        show_stderr: bool,

        /// Shell to execute commands with (e.g. pwsh, bash, cmd)
        #[arg(long)]
        shell: Option<String>,

        /// Parameter as name=value (repeatable); name=env:VAR reads the environment
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
    },

    /// Edit the commands of a set
    Edit {
        name: String,

        /// Replace the commands non-interactively (repeatable)
        #[arg(short = 'c', long = "command")]
        commands: Vec<String>,
    },

    /// Delete a command set
    Delete {
        name: String,

        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage tags for command sets
    Tag {
        #[command(subcommand)]
        action: TagCommands,
    },

    /// Show the version history of a set
    History { name: String },

    /// Restore a previous version of a set
    Rollback {
        name: String,

        /// Version number to roll back to
        #[arg(long = "version", allow_negative_numbers = true)]
        to: i64,
    },

    /// Export the database or a single set to a portable file
    Export {
        #[command(subcommand)]
        target: Option<ExportCommands>,
    },

    /// Import a database file or an exported set
    Import {
        #[command(subcommand)]
        source: Option<ImportCommands>,
    },

    /// Manage the stored author identity
    Whoami {
        #[command(subcommand)]
        action: WhoamiCommands,
    },

    /// Install the krnr binary into a user or system bin directory
    Install {
        /// Install into the user bin directory (default)
        #[arg(short, long)]
        user: bool,

        /// Install system-wide (requires admin)
        #[arg(long, conflicts_with = "user")]
        system: bool,

        /// Custom target directory
        #[arg(long)]
        path: Option<PathBuf>,

        /// Source binary (default: the running executable)
        #[arg(long)]
        from: Option<PathBuf>,

        /// Show the plan without changing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Only check installability
        #[arg(long)]
        check: bool,

        /// Assume yes for prompts
        #[arg(short, long)]
        yes: bool,

        /// Add the target directory to PATH
        #[arg(long)]
        add_to_path: bool,
    },

    /// Remove the installed binary and its PATH changes
    Uninstall {
        /// Show the plan without changing anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show installation status
    Status,

    /// Print version information
    Version,

    /// Interactive menu
    Tui,
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Add a tag to a set
    Add { name: String, tag: String },
    /// Remove a tag from a set
    Remove { name: String, tag: String },
    /// List the tags of a set
    List { name: String },
}

#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Copy the active database to a file
    Db {
        /// Destination (default: ./krnr-YYYY-MM-DD.db)
        #[arg(long)]
        dst: Option<PathBuf>,
    },
    /// Write one set to a standalone database file
    Set {
        name: String,

        #[arg(long)]
        dst: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ImportCommands {
    /// Import a whole database file
    Db {
        file: PathBuf,

        /// Replace the active database file
        #[arg(long)]
        overwrite: bool,

        /// rename|skip|overwrite|merge
        #[arg(long, default_value = "rename")]
        on_conflict: String,

        /// Drop duplicate commands when merging
        #[arg(long)]
        dedupe: bool,
    },
    /// Import the sets of an exported file
    Set {
        file: PathBuf,

        /// rename|skip|overwrite|merge
        #[arg(long, default_value = "rename")]
        on_conflict: String,

        /// Drop duplicate commands when merging
        #[arg(long)]
        dedupe: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum WhoamiCommands {
    /// Store the author identity
    Set {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: Option<String>,
    },
    /// Show the stored identity
    Show,
    /// Forget the stored identity
    Clear,
}
