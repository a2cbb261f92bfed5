//! Command handlers
//!
//! One module per group of subcommands. Each handler takes the resolved
//! [`Session`] and returns `anyhow::Result`; `main` renders the error.

pub mod edit;
pub mod history;
pub mod install;
pub mod interactive;
pub mod list;
pub mod run;
pub mod save;
pub mod tag;
pub mod transfer;
pub mod whoami;

use anyhow::{Context, Result};
use krnr::config::{self, Config};
use krnr::infrastructure::{db, JsonProfileRepository, SqliteCommandSetRepository};

use crate::cli::{Cli, Commands};
use crate::ui::context::UiContext;
use crate::ui::output;

/// Per-invocation state: output settings and the loaded configuration.
pub struct Session {
    pub ui: UiContext,
    pub config: Config,
}

impl Session {
    pub fn from_cli(cli: &Cli) -> Self {
        let (config, warnings) = load_config();
        let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config);
        if let Some((path, warnings)) = warnings {
            output::print_config_warnings(&ui, &path, &warnings);
        }
        Self { ui, config }
    }

    /// Open the active registry, creating it on first use.
    pub fn open_repo(&self) -> Result<SqliteCommandSetRepository> {
        let path = config::db_path()?;
        output::debug(&self.ui, format!("database: {}", path.display()));
        let conn = db::open().with_context(|| format!("open {}", path.display()))?;
        Ok(SqliteCommandSetRepository::new(conn))
    }

    pub fn profiles(&self) -> Result<JsonProfileRepository> {
        Ok(JsonProfileRepository::new(config::ensure_data_dir()?))
    }
}

type Warnings = Option<(std::path::PathBuf, Vec<config::ConfigWarning>)>;

/// `config.toml` with env overrides; an unreadable file falls back to defaults.
fn load_config() -> (Config, Warnings) {
    let Ok(path) = config::config_path() else {
        return (Config::default().with_env_overrides(), None);
    };
    if !path.exists() {
        return (Config::default().with_env_overrides(), None);
    }
    match Config::load_with_warnings(&path) {
        Ok((config, warnings)) => {
            let warnings = (!warnings.is_empty()).then(|| (path, warnings));
            (config.with_env_overrides(), warnings)
        }
        Err(err) => {
            eprintln!("ignoring {}: {}", path.display(), err);
            (Config::default().with_env_overrides(), None)
        }
    }
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let session = Session::from_cli(&cli);

    let Some(command) = cli.command else {
        return interactive::cmd_tui(&session);
    };

    match command {
        Commands::Save {
            name,
            description,
            commands,
            author,
            author_email,
        } => save::cmd_save(&session, name, description, commands, author, author_email),
        Commands::Record { name, description } => save::cmd_record(&session, name, description),
        Commands::List { tag, filter, fuzzy } => {
            list::cmd_list(&session, tag.as_deref(), filter.as_deref(), fuzzy)
        }
        Commands::Describe { name } => list::cmd_describe(&session, &name),
        Commands::Run {
            name,
            dry_run,
            confirm,
            force,
            suppress_command,
            show_stderr,
            shell,
            params,
        } => {
            let flags = run::RunFlags {
                dry_run,
                confirm,
                force,
                suppress_command,
                show_stderr,
                shell,
                params,
            };
            run::cmd_run(&session, &name, flags)
        }
        Commands::Edit { name, commands } => edit::cmd_edit(&session, &name, commands),
        Commands::Delete { name, yes } => edit::cmd_delete(&session, &name, yes),
        Commands::Tag { action } => tag::cmd_tag(&session, action),
        Commands::History { name } => history::cmd_history(&session, &name),
        Commands::Rollback { name, to } => history::cmd_rollback(&session, &name, to),
        Commands::Export { target } => transfer::cmd_export(&session, target),
        Commands::Import { source } => transfer::cmd_import(&session, source),
        Commands::Whoami { action } => whoami::cmd_whoami(&session, action),
        Commands::Install {
            user,
            system,
            path,
            from,
            dry_run,
            check,
            yes,
            add_to_path,
        } => {
            let opts = krnr::infrastructure::install::InstallOptions {
                user,
                system,
                path,
                from,
                dry_run,
                check,
                yes,
                add_to_path,
            };
            install::cmd_install(&session, opts)
        }
        Commands::Uninstall { dry_run, yes } => install::cmd_uninstall(&session, dry_run, yes),
        Commands::Status => install::cmd_status(&session),
        Commands::Version => cmd_version(&session),
        Commands::Tui => interactive::cmd_tui(&session),
    }
}

fn cmd_version(session: &Session) -> Result<()> {
    if session.ui.json {
        crate::ui::json::emit_data(
            "version",
            serde_json::json!({ "version": krnr::version() }),
        )?;
    } else {
        println!("krnr {}", krnr::version());
    }
    Ok(())
}
