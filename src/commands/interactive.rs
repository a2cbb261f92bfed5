//! Interactive menu for `krnr tui` and bare `krnr` in a terminal.
//!
//! A `dialoguer` loop over the same handlers the subcommands use. Errors from
//! one action are printed and the menu continues.

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::{Confirm, FuzzySelect, Input, Select};
use krnr::domain::ports::SetMetadata;
use krnr::domain::value_objects::{sanitize_name, ConflictPolicy};
use krnr::RegistryUseCase;

use super::run::{run_set, RunFlags};
use super::{edit, history, install, transfer, Session};
use crate::cli::{ExportCommands, ImportCommands};
use crate::ui::diff::render_command_diff;
use crate::ui::error::format_error;
use crate::ui::prompt::TerminalPrompter;
use crate::ui::sanitize::sanitize_output;
use crate::ui::terminal;
use crate::ui::theme::KrnrTheme;
use crate::ui::views::{browse_labels, render_describe};

const NON_INTERACTIVE_HINT: &str = "krnr: run 'krnr --help' to see available commands";

/// The menu on a terminal, a hint otherwise.
pub fn cmd_tui(session: &Session) -> Result<()> {
    if !session.ui.can_prompt() {
        println!("{}", NON_INTERACTIVE_HINT);
        return Ok(());
    }

    let menu = Menu {
        session,
        theme: KrnrTheme::new(session.ui.color, session.ui.unicode),
    };
    menu.main_loop()
}

struct Menu<'a> {
    session: &'a Session,
    theme: KrnrTheme,
}

enum SetAction {
    Stay,
    Leave,
}

impl Menu<'_> {
    fn main_loop(&self) -> Result<()> {
        let items = [
            "Browse command sets",
            "Create a command set",
            "Export",
            "Import",
            "Install status",
            "Quit",
        ];
        loop {
            let choice = Select::with_theme(&self.theme)
                .with_prompt("krnr")
                .items(&items)
                .default(0)
                .interact_opt()?;
            let result = match choice {
                Some(0) => self.browse(),
                Some(1) => self.create(),
                Some(2) => self.export(),
                Some(3) => self.import(),
                Some(4) => install::cmd_status(self.session),
                _ => return Ok(()),
            };
            self.report(result);
        }
    }

    fn report(&self, result: Result<()>) {
        if let Err(err) = result {
            eprint!(
                "{}",
                format_error(&err, self.session.ui.color, self.session.ui.unicode)
            );
        }
    }

    fn browse(&self) -> Result<()> {
        loop {
            let repo = self.session.open_repo()?;
            let sets = RegistryUseCase::new(&repo).list(None, None, false)?;
            if sets.is_empty() {
                println!("no command sets saved yet");
                return Ok(());
            }
            let width = terminal::detect_capabilities().width as usize;
            let labels = browse_labels(&sets, width.saturating_sub(4));
            let Some(index) = FuzzySelect::with_theme(&self.theme)
                .with_prompt("Command set")
                .items(&labels)
                .default(0)
                .interact_opt()?
            else {
                return Ok(());
            };
            self.set_loop(&sets[index].name)?;
        }
    }

    fn set_loop(&self, name: &str) -> Result<()> {
        let items = [
            "Describe",
            "Run",
            "Dry run",
            "Edit in $EDITOR",
            "Tags",
            "History",
            "Roll back",
            "Delete",
            "Back",
        ];
        loop {
            let choice = Select::with_theme(&self.theme)
                .with_prompt(name)
                .items(&items)
                .default(0)
                .interact_opt()?;
            let result = match choice {
                Some(0) => self.describe(name).map(|_| SetAction::Stay),
                Some(1) => self.run(name, false).map(|_| SetAction::Stay),
                Some(2) => self.run(name, true).map(|_| SetAction::Stay),
                Some(3) => edit::cmd_edit(self.session, name, Vec::new()).map(|_| SetAction::Stay),
                Some(4) => self.tags(name).map(|_| SetAction::Stay),
                Some(5) => history::cmd_history(self.session, name).map(|_| SetAction::Stay),
                Some(6) => self.rollback(name).map(|_| SetAction::Stay),
                Some(7) => self.delete(name),
                _ => return Ok(()),
            };
            match result {
                Ok(SetAction::Leave) => return Ok(()),
                Ok(SetAction::Stay) => {}
                Err(err) => self.report(Err(err)),
            }
        }
    }

    fn describe(&self, name: &str) -> Result<()> {
        let repo = self.session.open_repo()?;
        let set = RegistryUseCase::new(&repo).get(name)?;
        print!("{}", render_describe(&set));
        Ok(())
    }

    /// Run with output captured, then print it with terminal control
    /// sequences cleaned up.
    fn run(&self, name: &str, dry_run: bool) -> Result<()> {
        let flags = RunFlags {
            dry_run,
            ..RunFlags::default()
        };
        let prompter = TerminalPrompter::new(&self.session.ui);
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run_set(self.session, name, &flags, &prompter, &mut out, &mut err);

        print!("{}", sanitize_output(&String::from_utf8_lossy(&out)));
        if !err.is_empty() {
            eprint!("{}", sanitize_output(&String::from_utf8_lossy(&err)));
        }
        result.map(|_| ())
    }

    fn tags(&self, name: &str) -> Result<()> {
        let repo = self.session.open_repo()?;
        let registry = RegistryUseCase::new(&repo);
        let tags = registry.tags(name)?;
        if tags.is_empty() {
            println!("no tags");
        } else {
            println!("tags: {}", tags.join(", "));
        }

        let choice = Select::with_theme(&self.theme)
            .with_prompt("Tags")
            .items(&["Add tag", "Remove tag", "Back"])
            .default(0)
            .interact_opt()?;
        match choice {
            Some(0) => {
                let tag: String = Input::with_theme(&self.theme)
                    .with_prompt("Tag")
                    .interact_text()?;
                registry.add_tag(name, &tag)?;
                println!("added tag '{}' to '{}'", tag.trim(), name);
            }
            Some(1) if !tags.is_empty() => {
                if let Some(i) = Select::with_theme(&self.theme)
                    .with_prompt("Remove which tag?")
                    .items(&tags)
                    .interact_opt()?
                {
                    registry.remove_tag(name, &tags[i])?;
                    println!("removed tag '{}' from '{}'", tags[i], name);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn rollback(&self, name: &str) -> Result<()> {
        let repo = self.session.open_repo()?;
        let registry = RegistryUseCase::new(&repo);
        let versions = registry.history(name)?;
        if versions.is_empty() {
            println!("no history for {}", name);
            return Ok(());
        }

        let labels: Vec<String> = versions
            .iter()
            .map(|v| format!("v{}  {}  {}", v.version, v.created_at, v.operation))
            .collect();
        let Some(index) = Select::with_theme(&self.theme)
            .with_prompt("Roll back to")
            .items(&labels)
            .interact_opt()?
        else {
            return Ok(());
        };
        let version = versions[index].version;

        let diff = registry.preview_rollback(name, version)?;
        let target = format!("v{}", version);
        print!(
            "{}",
            render_command_diff("current", &target, &diff, self.session.ui.color)
        );
        if !Confirm::with_theme(&self.theme)
            .with_prompt(format!("Roll back '{}' to {}?", name, target))
            .default(false)
            .interact()?
        {
            println!("aborted");
            return Ok(());
        }
        registry.rollback(name, version)?;
        println!("rolled back {} to {}", name, target);
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<SetAction> {
        if !Confirm::with_theme(&self.theme)
            .with_prompt(format!("Delete '{}' permanently?", name))
            .default(false)
            .interact()?
        {
            println!("aborted");
            return Ok(SetAction::Stay);
        }
        let repo = self.session.open_repo()?;
        RegistryUseCase::new(&repo).delete(name)?;
        println!("deleted '{}'", name);
        Ok(SetAction::Leave)
    }

    fn create(&self) -> Result<()> {
        let name: String = Input::with_theme(&self.theme)
            .with_prompt("Name")
            .interact_text()?;
        let description: String = Input::with_theme(&self.theme)
            .with_prompt("Description (optional)")
            .allow_empty(true)
            .interact_text()?;

        let mut commands = Vec::new();
        loop {
            let command: String = Input::with_theme(&self.theme)
                .with_prompt(format!("Command {} (empty to finish)", commands.len() + 1))
                .allow_empty(true)
                .interact_text()?;
            if command.trim().is_empty() {
                break;
            }
            commands.push(command);
        }

        let (name, changed) = clean_new_name(&name);
        if changed {
            println!("invalid characters removed from name");
        }

        let repo = self.session.open_repo()?;
        let profiles = self.session.profiles()?;
        let registry = RegistryUseCase::new(&repo).with_profiles(&profiles);
        let (author_name, author_email) = registry.resolve_author(None, None)?;
        let meta = SetMetadata {
            description: Some(description).filter(|d| !d.trim().is_empty()),
            author_name,
            author_email,
            ..SetMetadata::named(&name)
        };
        let count = registry.save(&meta, &commands)?;
        println!("saved '{}' with {} commands", meta.name, count);
        Ok(())
    }

    fn export(&self) -> Result<()> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Export")
            .items(&["Whole database", "Single set", "Back"])
            .default(0)
            .interact_opt()?;
        let target = match choice {
            Some(0) => {
                let dst: String = Input::with_theme(&self.theme)
                    .with_prompt("Destination path (leave empty for default)")
                    .allow_empty(true)
                    .interact_text()?;
                ExportCommands::Db {
                    dst: Some(dst).filter(|d| !d.trim().is_empty()).map(PathBuf::from),
                }
            }
            Some(1) => {
                let name: String = Input::with_theme(&self.theme)
                    .with_prompt("Name of set to export")
                    .interact_text()?;
                let dst: String = Input::with_theme(&self.theme)
                    .with_prompt("Destination path")
                    .interact_text()?;
                ExportCommands::Set {
                    name: name.trim().to_string(),
                    dst: PathBuf::from(dst.trim()),
                }
            }
            _ => return Ok(()),
        };
        transfer::cmd_export(self.session, Some(target))
    }

    fn import(&self) -> Result<()> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt("Import")
            .items(&["Database file", "Exported set file", "Back"])
            .default(0)
            .interact_opt()?;
        let source = match choice {
            Some(0) => {
                let file: String = Input::with_theme(&self.theme)
                    .with_prompt("Path to source DB file")
                    .interact_text()?;
                let overwrite = Confirm::with_theme(&self.theme)
                    .with_prompt("Overwrite destination DB if it exists?")
                    .default(false)
                    .interact()?;
                let (on_conflict, dedupe) = self.conflict_policy()?;
                ImportCommands::Db {
                    file: PathBuf::from(file.trim()),
                    overwrite,
                    on_conflict,
                    dedupe,
                }
            }
            Some(1) => {
                let file: String = Input::with_theme(&self.theme)
                    .with_prompt("Path to exported set file")
                    .interact_text()?;
                let (on_conflict, dedupe) = self.conflict_policy()?;
                ImportCommands::Set {
                    file: PathBuf::from(file.trim()),
                    on_conflict,
                    dedupe,
                }
            }
            _ => return Ok(()),
        };
        transfer::cmd_import(self.session, Some(source))
    }

    fn conflict_policy(&self) -> Result<(String, bool)> {
        let labels: Vec<&str> = ConflictPolicy::ALL.iter().map(|p| p.as_str()).collect();
        let index = Select::with_theme(&self.theme)
            .with_prompt("On conflict")
            .items(&labels)
            .default(0)
            .interact()?;
        let policy = ConflictPolicy::ALL[index];
        let dedupe = policy == ConflictPolicy::Merge
            && Confirm::with_theme(&self.theme)
                .with_prompt("Dedupe when merging?")
                .default(false)
                .interact()?;
        Ok((policy.to_string(), dedupe))
    }
}

/// Trim a name typed into the menu and strip pasted invisible characters.
fn clean_new_name(raw: &str) -> (String, bool) {
    sanitize_name(raw.trim())
}
