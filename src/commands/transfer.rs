use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use krnr::config;
use krnr::domain::value_objects::ConflictPolicy;
use krnr::infrastructure::transfer::{
    default_export_path, export_command_set, export_database, import_command_set, import_database,
    ImportOptions, ImportOutcome, ImportReport,
};
use krnr::KrnrError;

use super::Session;
use crate::cli::{ExportCommands, ImportCommands};
use crate::ui::json::emit_data;
use crate::ui::output;

/// Print `prompt` and read one trimmed line; end of input reads as empty.
fn ask_line(input: &mut dyn BufRead, out: &mut dyn Write, prompt: &str) -> io::Result<String> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

pub fn parse_policy(value: &str) -> Result<ConflictPolicy> {
    value
        .parse()
        .map_err(|bad: String| KrnrError::UnknownPolicy(bad).into())
}

pub fn cmd_export(session: &Session, target: Option<ExportCommands>) -> Result<()> {
    let target = match target {
        Some(target) => target,
        None => {
            let stdin = io::stdin();
            choose_export(&mut stdin.lock(), &mut io::stdout())?
        }
    };

    match target {
        ExportCommands::Db { dst } => export_db(session, dst),
        ExportCommands::Set { name, dst } => export_set(session, &name, &dst),
    }
}

/// Walk the user through picking an export when no subcommand was given.
fn choose_export(input: &mut dyn BufRead, out: &mut dyn Write) -> Result<ExportCommands> {
    writeln!(out, "Select export type:\n  1) db\n  2) set")?;
    let choice = ask_line(input, out, "Enter choice [1/2]: ")?;
    match choice.as_str() {
        "1" | "db" => {
            let dst = ask_line(input, out, "Destination path (leave empty for default): ")?;
            Ok(ExportCommands::Db {
                dst: (!dst.is_empty()).then(|| PathBuf::from(dst)),
            })
        }
        "2" | "set" => {
            let name = ask_line(input, out, "Name of set to export: ")?;
            if name.is_empty() {
                bail!("set name cannot be empty");
            }
            let dst = ask_line(input, out, "Destination path: ")?;
            if dst.is_empty() {
                bail!("destination required");
            }
            Ok(ExportCommands::Set {
                name,
                dst: PathBuf::from(dst),
            })
        }
        other => bail!("invalid choice: {}", other),
    }
}

fn export_db(session: &Session, dst: Option<PathBuf>) -> Result<()> {
    let repo = session.open_repo()?;
    let src = config::db_path()?;
    let dst = dst.unwrap_or_else(|| default_export_path(Path::new("."), chrono::Utc::now().date_naive()));

    let hash = export_database(repo.connection(), &src, &dst)?;
    output::debug(&session.ui, format!("sha256 {}", hash.hex()));

    if session.ui.json {
        emit_data(
            "export",
            serde_json::json!({ "kind": "db", "path": dst, "sha256": hash.hex() }),
        )?;
    } else {
        println!("exported database to {}", dst.display());
        println!("sha256: {}", hash.hex());
    }
    Ok(())
}

fn export_set(session: &Session, name: &str, dst: &Path) -> Result<()> {
    let repo = session.open_repo()?;
    export_command_set(repo.connection(), name, dst)?;

    if session.ui.json {
        emit_data("export", serde_json::json!({ "kind": "set", "name": name, "path": dst }))?;
    } else {
        println!("exported command set '{}' to {}", name, dst.display());
    }
    Ok(())
}

pub fn cmd_import(session: &Session, source: Option<ImportCommands>) -> Result<()> {
    let source = match source {
        Some(source) => source,
        None => {
            let stdin = io::stdin();
            choose_import(&mut stdin.lock(), &mut io::stdout())?
        }
    };

    match source {
        ImportCommands::Db {
            file,
            overwrite,
            on_conflict,
            dedupe,
        } => {
            let opts = ImportOptions {
                on_conflict: parse_policy(&on_conflict)?,
                dedupe,
            };
            let dst = config::db_path()?;
            output::debug(&session.ui, format!("importing into {}", dst.display()));
            let report = import_database(&file, &dst, overwrite, opts)?;
            report_import(session, "db", &file, &report, "imported database from")
        }
        ImportCommands::Set {
            file,
            on_conflict,
            dedupe,
        } => {
            let opts = ImportOptions {
                on_conflict: parse_policy(&on_conflict)?,
                dedupe,
            };
            let repo = session.open_repo()?;
            let report = import_command_set(&file, &repo, opts)?;
            report_import(session, "set", &file, &report, "imported command set(s) from")
        }
    }
}

fn choose_import(input: &mut dyn BufRead, out: &mut dyn Write) -> Result<ImportCommands> {
    writeln!(out, "Select import type:\n  1) db\n  2) set")?;
    let choice = ask_line(input, out, "Enter choice [1/2]: ")?;
    match choice.as_str() {
        "1" | "db" => {
            let file = ask_line(input, out, "Path to source DB file: ")?;
            if file.is_empty() {
                bail!("source path cannot be empty");
            }
            let overwrite = is_yes(&ask_line(
                input,
                out,
                "Overwrite destination DB if it exists? [y/N]: ",
            )?);
            Ok(ImportCommands::Db {
                file: PathBuf::from(file),
                overwrite,
                on_conflict: ConflictPolicy::Rename.to_string(),
                dedupe: false,
            })
        }
        "2" | "set" => {
            let file = ask_line(input, out, "Path to exported set file: ")?;
            if file.is_empty() {
                bail!("source path cannot be empty");
            }
            let (on_conflict, dedupe) = ask_conflict(input, out)?;
            Ok(ImportCommands::Set {
                file: PathBuf::from(file),
                on_conflict,
                dedupe,
            })
        }
        other => bail!("invalid choice: {}", other),
    }
}

fn ask_conflict(input: &mut dyn BufRead, out: &mut dyn Write) -> Result<(String, bool)> {
    let mut policy = ask_line(input, out, "On conflict (rename|skip|overwrite|merge) [rename]: ")?;
    if policy.is_empty() {
        policy = ConflictPolicy::Rename.to_string();
    }
    parse_policy(&policy)?;
    let dedupe = is_yes(&ask_line(input, out, "Dedupe when merging? [y/N]: ")?);
    Ok((policy, dedupe))
}

fn describe_outcome(outcome: &ImportOutcome) -> String {
    match outcome {
        ImportOutcome::Imported { name } => format!("imported '{}'", name),
        ImportOutcome::Renamed { from, to } => format!("imported '{}' as '{}'", from, to),
        ImportOutcome::Skipped { name } => format!("skipped '{}' (already exists)", name),
        ImportOutcome::Overwritten { name } => format!("overwrote '{}'", name),
        ImportOutcome::Merged { name, added } => format!("merged {} commands into '{}'", added, name),
    }
}

fn report_import(
    session: &Session,
    kind: &str,
    src: &Path,
    report: &ImportReport,
    headline: &str,
) -> Result<()> {
    if session.ui.json {
        emit_data(
            "import",
            serde_json::json!({ "kind": kind, "path": src, "report": report }),
        )?;
        return Ok(());
    }
    for outcome in &report.sets {
        output::debug(&session.ui, describe_outcome(outcome));
    }
    println!("{} {}", headline, src.display());
    Ok(())
}
