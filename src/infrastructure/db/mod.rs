//! SQLite storage
//!
//! Opens the registry database and keeps its schema current. The schema is
//! idempotent (`IF NOT EXISTS` everywhere), so it is applied on every open.

use std::fs;
use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

use crate::config;
use crate::error::KrnrResult;

const SCHEMA: &str = include_str!("schema.sql");
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Open the active registry database (`KRNR_DB` or `<data dir>/krnr.db`).
///
/// The data directory is created even when `KRNR_DB` points elsewhere; the
/// profile and install metadata live there.
pub fn open() -> KrnrResult<Connection> {
    config::ensure_data_dir()?;
    open_at(&config::db_path()?)
}

/// Open (creating if needed) the database at `path` and apply the schema.
pub fn open_at(path: &Path) -> KrnrResult<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    // WAL is best-effort: some filesystems refuse it and the default journal works.
    let _ = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get::<_, String>(0));
    apply_schema(&conn)?;
    Ok(conn)
}

/// Fresh database with the schema, for tests and scratch work.
pub fn open_in_memory() -> KrnrResult<Connection> {
    let conn = Connection::open_in_memory()?;
    apply_schema(&conn)?;
    Ok(conn)
}

pub fn apply_schema(conn: &Connection) -> KrnrResult<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Fold the WAL back into the main file so a plain file copy is complete.
pub fn checkpoint(conn: &Connection) -> KrnrResult<()> {
    conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))?;
    Ok(())
}
