//! Importing exported databases.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use serde::Serialize;

use crate::domain::ports::{CommandSetRepository, SetMetadata};
use crate::domain::services::merge_commands;
use crate::domain::value_objects::ConflictPolicy;
use crate::error::{KrnrError, KrnrResult};
use crate::infrastructure::db;
use crate::infrastructure::fs::copy_file;
use crate::infrastructure::repositories::SqliteCommandSetRepository;

use super::{read_commands, read_tags, SetRow};

/// Version description stamped on every imported set.
const IMPORT_NOTE: &str = "import";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    pub on_conflict: ConflictPolicy,
    /// Drop incoming commands already present when merging.
    pub dedupe: bool,
}

/// What happened to one incoming set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ImportOutcome {
    Imported { name: String },
    Renamed { from: String, to: String },
    Skipped { name: String },
    Overwritten { name: String },
    Merged { name: String, added: usize },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Set when the whole source file replaced the destination.
    pub replaced_database: bool,
    pub sets: Vec<ImportOutcome>,
}

/// Import the database at `src` into the database file at `dst`.
///
/// When `dst` exists and `overwrite` is false, the default `rename` policy is
/// refused and the other policies import set by set. Otherwise `src` is
/// copied over `dst`.
pub fn import_database(
    src: &Path,
    dst: &Path,
    overwrite: bool,
    opts: ImportOptions,
) -> KrnrResult<ImportReport> {
    ensure_source(src)?;

    if dst.exists() && !overwrite {
        if opts.on_conflict == ConflictPolicy::Rename {
            return Err(KrnrError::DestinationExists);
        }
        let repo = SqliteCommandSetRepository::new(db::open_at(dst)?);
        return import_command_set(src, &repo, opts);
    }

    // Stale journal files would be replayed against the new database.
    for suffix in ["-wal", "-shm"] {
        let mut side = dst.as_os_str().to_owned();
        side.push(suffix);
        let side = PathBuf::from(side);
        if side.exists() {
            fs::remove_file(&side)?;
        }
    }
    copy_file(src, dst)?;
    Ok(ImportReport {
        replaced_database: true,
        sets: Vec::new(),
    })
}

/// Import every set in `src` into `repo`, resolving name clashes with
/// `opts.on_conflict`.
pub fn import_command_set(
    src: &Path,
    repo: &SqliteCommandSetRepository,
    opts: ImportOptions,
) -> KrnrResult<ImportReport> {
    ensure_source(src)?;
    let source = Connection::open(src)?;

    let rows = {
        let mut stmt = source.prepare(&format!(
            "SELECT {} FROM command_sets ORDER BY id ASC",
            SetRow::COLUMNS
        ))?;
        let rows = stmt.query_map([], SetRow::from_row)?;
        rows.collect::<Result<Vec<_>, _>>()?
    };

    let mut report = ImportReport::default();
    for row in rows {
        let commands = read_commands(&source, row.id)?;
        let tags = read_tags(&source, row.id)?;
        let outcome = import_one(repo, &row, &commands, &tags, opts)?;
        report.sets.push(outcome);
    }
    Ok(report)
}

fn import_one(
    repo: &SqliteCommandSetRepository,
    row: &SetRow,
    commands: &[String],
    tags: &[String],
    opts: ImportOptions,
) -> KrnrResult<ImportOutcome> {
    let existing = repo.get_command_set_by_name(&row.name)?;

    let Some(existing) = existing else {
        insert_set(repo, row, &row.name, commands, tags)?;
        return Ok(ImportOutcome::Imported {
            name: row.name.clone(),
        });
    };

    match opts.on_conflict {
        ConflictPolicy::Rename => {
            let name = unique_name(repo, &row.name)?;
            insert_set(repo, row, &name, commands, tags)?;
            Ok(ImportOutcome::Renamed {
                from: row.name.clone(),
                to: name,
            })
        }
        ConflictPolicy::Skip => Ok(ImportOutcome::Skipped {
            name: row.name.clone(),
        }),
        ConflictPolicy::Overwrite => {
            repo.overwrite_with_imported(
                &imported_meta(row, &row.name),
                &row.created_at,
                row.last_run.as_deref(),
                commands,
                tags,
                IMPORT_NOTE,
            )?;
            Ok(ImportOutcome::Overwritten {
                name: row.name.clone(),
            })
        }
        ConflictPolicy::Merge => {
            let current = existing.command_texts();
            let merged = merge_commands(&current, commands, opts.dedupe);
            let added = merged.len() - current.len();
            if added > 0 {
                repo.replace_commands(existing.id, &merged)?;
            }
            Ok(ImportOutcome::Merged {
                name: row.name.clone(),
                added,
            })
        }
    }
}

/// `name`, or `name-import-N` for the first N not taken.
fn unique_name(repo: &SqliteCommandSetRepository, name: &str) -> KrnrResult<String> {
    let mut candidate = name.to_string();
    let mut n = 1;
    while repo.get_command_set_by_name(&candidate)?.is_some() {
        candidate = format!("{name}-import-{n}");
        n += 1;
    }
    Ok(candidate)
}

/// Insert a copy of `row` as `name`.
fn insert_set(
    repo: &SqliteCommandSetRepository,
    row: &SetRow,
    name: &str,
    commands: &[String],
    tags: &[String],
) -> KrnrResult<i64> {
    let id = repo.insert_imported(
        &imported_meta(row, name),
        &row.created_at,
        row.last_run.as_deref(),
        commands,
        tags,
        IMPORT_NOTE,
    )?;
    Ok(id)
}

fn imported_meta(row: &SetRow, name: &str) -> SetMetadata {
    SetMetadata {
        name: name.to_string(),
        description: row.description.clone(),
        author_name: row.author_name.clone(),
        author_email: row.author_email.clone(),
    }
}

fn ensure_source(src: &Path) -> KrnrResult<()> {
    if src.is_file() {
        Ok(())
    } else {
        Err(KrnrError::SourceNotFound {
            path: src.to_path_buf(),
        })
    }
}
