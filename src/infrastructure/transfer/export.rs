//! Exporting the registry to portable SQLite files.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::value_objects::ContentHash;
use crate::error::{KrnrError, KrnrResult};
use crate::infrastructure::db;
use crate::infrastructure::fs::copy_file;

use super::{read_commands, read_tags, SetRow};

/// Copy the active database at `src` to `dst` and return the SHA-256 of the
/// written file.
///
/// `conn` is checkpointed first so the copy holds every committed write.
pub fn export_database(conn: &Connection, src: &Path, dst: &Path) -> KrnrResult<ContentHash> {
    db::checkpoint(conn)?;
    copy_file(src, dst)?;
    let hash = ContentHash::from_reader(File::open(dst)?)?;
    Ok(hash)
}

/// `<dir>/krnr-YYYY-MM-DD.db`, or the first free `-N` suffixed variant.
pub fn default_export_path(dir: &Path, today: NaiveDate) -> PathBuf {
    let stem = format!("krnr-{}", today.format("%Y-%m-%d"));
    let first = dir.join(format!("{stem}.db"));
    if !first.exists() {
        return first;
    }
    (1..)
        .map(|n| dir.join(format!("{stem}-{n}.db")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}

/// Write the set called `name` into a fresh database at `dst`.
pub fn export_command_set(src: &Connection, name: &str, dst: &Path) -> KrnrResult<()> {
    let row = src
        .query_row(
            &format!("SELECT {} FROM command_sets WHERE name = ?1", SetRow::COLUMNS),
            [name],
            SetRow::from_row,
        )
        .optional()?
        .ok_or_else(|| KrnrError::NotFound(name.to_string()))?;

    let commands = read_commands(src, row.id)?;
    let tags = read_tags(src, row.id)?;

    let out = db::open_at(dst)?;
    let tx = out.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO command_sets (name, description, author_name, author_email, created_at, last_run)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            row.name,
            row.description,
            row.author_name,
            row.author_email,
            row.created_at,
            row.last_run
        ],
    )?;
    let id = tx.last_insert_rowid();
    for (i, cmd) in commands.iter().enumerate() {
        tx.execute(
            "INSERT INTO commands (command_set_id, position, command) VALUES (?1, ?2, ?3)",
            params![id, i as i64 + 1, cmd],
        )?;
    }
    for tag in &tags {
        tx.execute("INSERT OR IGNORE INTO tags (name) VALUES (?1)", [tag])?;
        tx.execute(
            "INSERT OR IGNORE INTO command_set_tags (command_set_id, tag_id)
             SELECT ?1, id FROM tags WHERE name = ?2",
            params![id, tag],
        )?;
    }
    tx.commit()?;
    db::checkpoint(&out)?;
    Ok(())
}
