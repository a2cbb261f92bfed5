//! Moving command sets between databases.
//!
//! Exports are plain SQLite files with the regular schema, so any export can
//! be imported back or opened directly with `KRNR_DB`.

mod export;
mod import;

pub use export::{default_export_path, export_command_set, export_database};
pub use import::{import_command_set, import_database, ImportOptions, ImportOutcome, ImportReport};

use rusqlite::{Connection, Row};

/// A `command_sets` row as copied between databases.
#[derive(Debug, Clone)]
struct SetRow {
    id: i64,
    name: String,
    description: Option<String>,
    author_name: Option<String>,
    author_email: Option<String>,
    created_at: String,
    last_run: Option<String>,
}

impl SetRow {
    const COLUMNS: &'static str =
        "id, name, description, author_name, author_email, created_at, last_run";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            author_name: row.get(3)?,
            author_email: row.get(4)?,
            created_at: row.get(5)?,
            last_run: row.get(6)?,
        })
    }
}

fn read_commands(conn: &Connection, set_id: i64) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT command FROM commands WHERE command_set_id = ?1 ORDER BY position ASC, id ASC",
    )?;
    let rows = stmt.query_map([set_id], |r| r.get(0))?;
    rows.collect()
}

fn read_tags(conn: &Connection, set_id: i64) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT t.name FROM tags t
         JOIN command_set_tags cst ON t.id = cst.tag_id
         WHERE cst.command_set_id = ?1 ORDER BY t.name",
    )?;
    let rows = stmt.query_map([set_id], |r| r.get(0))?;
    rows.collect()
}
