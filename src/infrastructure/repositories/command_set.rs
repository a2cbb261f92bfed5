//! SQLite Command Set Repository
//!
//! Every write that touches commands or metadata appends a row to
//! `command_set_versions` inside the same transaction.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::entities::{Command, CommandSet, Operation, Version};
use crate::domain::ports::{CommandSetRepository, RepositoryError, RepositoryResult, SetMetadata};
use crate::domain::services::matches_command_set;
use crate::domain::value_objects::validate_name;

const SET_COLUMNS: &str =
    "cs.id, cs.name, cs.description, cs.author_name, cs.author_email, cs.created_at, cs.last_run";

const VERSION_COLUMNS: &str = "id, command_set_id, version, created_at, author_name, author_email, \
                               description, commands, operation";

pub struct SqliteCommandSetRepository {
    conn: Connection,
}

impl SqliteCommandSetRepository {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn query_sets(&self, sql: &str, args: impl rusqlite::Params) -> RepositoryResult<Vec<CommandSet>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut sets = stmt
            .query_map(args, set_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        for set in &mut sets {
            set.tags = tags_for(&self.conn, set.id)?;
        }
        Ok(sets)
    }

    /// Insert a set copied from another database, keeping its timestamps.
    ///
    /// The `create` version carries `note` as its description.
    pub fn insert_imported(
        &self,
        meta: &SetMetadata,
        created_at: &str,
        last_run: Option<&str>,
        commands: &[String],
        tags: &[String],
        note: &str,
    ) -> RepositoryResult<i64> {
        validate_name(meta.name.trim())?;
        let tx = self.conn.unchecked_transaction()?;
        let id = insert_imported_in(&tx, meta, created_at, last_run, commands, tags, note)?;
        tx.commit()?;
        Ok(id)
    }

    /// Replace the set named `meta.name` with an imported copy.
    ///
    /// The delete and the insert share one transaction, so a failed insert
    /// leaves the existing set untouched.
    pub fn overwrite_with_imported(
        &self,
        meta: &SetMetadata,
        created_at: &str,
        last_run: Option<&str>,
        commands: &[String],
        tags: &[String],
        note: &str,
    ) -> RepositoryResult<i64> {
        let name = meta.name.trim();
        validate_name(name)?;
        let tx = self.conn.unchecked_transaction()?;
        let existing: Option<i64> = tx
            .query_row("SELECT id FROM command_sets WHERE name = ?1", [name], |r| r.get(0))
            .optional()?;
        if let Some(id) = existing {
            delete_set_in(&tx, id)?;
        }
        let id = insert_imported_in(&tx, meta, created_at, last_run, commands, tags, note)?;
        tx.commit()?;
        Ok(id)
    }

    fn set_id_by_name(&self, name: &str) -> RepositoryResult<Option<i64>> {
        Ok(self
            .conn
            .query_row("SELECT id FROM command_sets WHERE name = ?1", [name], |r| r.get(0))
            .optional()?)
    }
}

impl CommandSetRepository for SqliteCommandSetRepository {
    fn create_command_set(&self, meta: &SetMetadata, initial_commands: &[String]) -> RepositoryResult<i64> {
        let name = meta.name.trim();
        validate_name(name)?;

        let tx = self.conn.unchecked_transaction()?;
        // The existence check runs inside the INSERT so concurrent processes
        // cannot both pass it.
        let inserted = tx.execute(
            "INSERT INTO command_sets (name, description, author_name, author_email, created_at)
             SELECT ?1, ?2, ?3, ?4, datetime('now')
             WHERE NOT EXISTS (SELECT 1 FROM command_sets WHERE TRIM(name) = ?1)",
            params![name, meta.description, meta.author_name, meta.author_email],
        )?;
        if inserted == 0 {
            return Err(RepositoryError::NameInUse(name.to_string()));
        }
        let id = tx.last_insert_rowid();

        let stored: String = tx.query_row(
            "SELECT TRIM(name) FROM command_sets WHERE id = ?1",
            [id],
            |r| r.get(0),
        )?;
        if stored.is_empty() || stored != name {
            return Err(RepositoryError::SanityCheck("inserted name mismatch".into()));
        }

        let commands = non_blank(initial_commands);
        insert_commands(&tx, id, &commands)?;
        record_version_in(&tx, id, meta, &commands, Operation::Create)?;

        tx.commit()?;
        Ok(id)
    }

    fn add_command(&self, set_id: i64, position: i64, command: &str) -> RepositoryResult<i64> {
        self.conn.execute(
            "INSERT INTO commands (command_set_id, position, command) VALUES (?1, ?2, ?3)",
            params![set_id, position, command],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_command_set_by_name(&self, name: &str) -> RepositoryResult<Option<CommandSet>> {
        let sql = format!("SELECT {SET_COLUMNS} FROM command_sets cs WHERE cs.name = ?1");
        let Some(mut set) = self
            .conn
            .query_row(&sql, [name], set_from_row)
            .optional()?
        else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            "SELECT id, command_set_id, position, command FROM commands
             WHERE command_set_id = ?1 ORDER BY position ASC, id ASC",
        )?;
        set.commands = stmt
            .query_map([set.id], |r| {
                Ok(Command {
                    id: r.get(0)?,
                    command_set_id: r.get(1)?,
                    position: r.get(2)?,
                    command: r.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        set.tags = tags_for(&self.conn, set.id)?;
        Ok(Some(set))
    }

    fn list_command_sets(&self) -> RepositoryResult<Vec<CommandSet>> {
        let sql = format!("SELECT {SET_COLUMNS} FROM command_sets cs ORDER BY cs.created_at DESC, cs.id DESC");
        self.query_sets(&sql, [])
    }

    fn update_command_set(&self, set_id: i64, meta: &SetMetadata, tags: &[String]) -> RepositoryResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        ensure_name_free(&tx, &meta.name, set_id)?;
        update_metadata(&tx, set_id, meta)?;
        replace_tags(&tx, set_id, tags)?;
        let commands = command_texts(&tx, set_id)?;
        record_version_in(&tx, set_id, meta, &commands, Operation::Update)?;
        tx.commit()?;
        Ok(())
    }

    fn update_command_set_and_replace_commands(
        &self,
        set_id: i64,
        meta: &SetMetadata,
        tags: &[String],
        commands: &[String],
    ) -> RepositoryResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        ensure_name_free(&tx, &meta.name, set_id)?;
        update_metadata(&tx, set_id, meta)?;
        replace_tags(&tx, set_id, tags)?;
        let commands = non_blank(commands);
        tx.execute("DELETE FROM commands WHERE command_set_id = ?1", [set_id])?;
        insert_commands(&tx, set_id, &commands)?;
        record_version_in(&tx, set_id, meta, &commands, Operation::Update)?;
        tx.commit()?;
        Ok(())
    }

    fn replace_commands(&self, set_id: i64, commands: &[String]) -> RepositoryResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM commands WHERE command_set_id = ?1", [set_id])?;
        insert_commands(&tx, set_id, commands)?;
        record_version_in(&tx, set_id, &SetMetadata::default(), commands, Operation::Update)?;
        tx.commit()?;
        Ok(())
    }

    fn delete_command_set(&self, name: &str) -> RepositoryResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let id: Option<i64> = tx
            .query_row("SELECT id FROM command_sets WHERE name = ?1", [name], |r| r.get(0))
            .optional()?;
        let Some(id) = id else {
            return Ok(());
        };
        delete_set_in(&tx, id)?;
        tx.commit()?;
        Ok(())
    }

    fn add_tag_to_command_set(&self, set_id: i64, tag: &str) -> RepositoryResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        attach_tag(&tx, set_id, tag)?;
        tx.commit()?;
        Ok(())
    }

    fn remove_tag_from_command_set(&self, set_id: i64, tag: &str) -> RepositoryResult<()> {
        self.conn.execute(
            "DELETE FROM command_set_tags
             WHERE command_set_id = ?1 AND tag_id = (SELECT id FROM tags WHERE name = ?2)",
            params![set_id, tag],
        )?;
        Ok(())
    }

    fn list_tags_for_command_set(&self, set_id: i64) -> RepositoryResult<Vec<String>> {
        tags_for(&self.conn, set_id)
    }

    fn list_command_sets_by_tag(&self, tag: &str) -> RepositoryResult<Vec<CommandSet>> {
        let sql = format!(
            "SELECT {SET_COLUMNS} FROM command_sets cs
             JOIN command_set_tags cst ON cs.id = cst.command_set_id
             JOIN tags t ON t.id = cst.tag_id
             WHERE t.name = ?1
             ORDER BY cs.created_at DESC, cs.id DESC"
        );
        self.query_sets(&sql, [tag])
    }

    fn search_command_sets(&self, query: &str) -> RepositoryResult<Vec<CommandSet>> {
        let pattern = format!("%{}%", query);
        let sql = format!(
            "SELECT DISTINCT {SET_COLUMNS} FROM command_sets cs
             LEFT JOIN commands c ON c.command_set_id = cs.id
             WHERE cs.name LIKE ?1 OR cs.description LIKE ?1 OR c.command LIKE ?1
             ORDER BY cs.created_at DESC, cs.id DESC"
        );
        self.query_sets(&sql, [pattern])
    }

    fn fuzzy_search_command_sets(&self, query: &str) -> RepositoryResult<Vec<CommandSet>> {
        let mut out = Vec::new();
        for summary in self.list_command_sets()? {
            if let Some(set) = self.get_command_set_by_name(&summary.name)? {
                if matches_command_set(&set, query) {
                    out.push(set);
                }
            }
        }
        Ok(out)
    }

    fn record_version(
        &self,
        set_id: i64,
        meta: &SetMetadata,
        commands: &[String],
        operation: Operation,
    ) -> RepositoryResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        record_version_in(&tx, set_id, meta, commands, operation)?;
        tx.commit()?;
        Ok(())
    }

    fn list_versions(&self, set_id: i64) -> RepositoryResult<Vec<Version>> {
        let sql = format!(
            "SELECT {VERSION_COLUMNS} FROM command_set_versions
             WHERE command_set_id = ?1 ORDER BY version DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let raw = stmt
            .query_map([set_id], RawVersion::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raw.into_iter().map(RawVersion::into_version).collect()
    }

    fn list_versions_by_name(&self, name: &str) -> RepositoryResult<Vec<Version>> {
        match self.set_id_by_name(name)? {
            Some(id) => self.list_versions(id),
            None => Ok(Vec::new()),
        }
    }

    fn get_version(&self, set_id: i64, version: i64) -> RepositoryResult<Option<Version>> {
        let sql = format!(
            "SELECT {VERSION_COLUMNS} FROM command_set_versions
             WHERE command_set_id = ?1 AND version = ?2"
        );
        self.conn
            .query_row(&sql, [set_id, version], RawVersion::from_row)
            .optional()?
            .map(RawVersion::into_version)
            .transpose()
    }

    fn apply_version_by_name(&self, name: &str, version: i64) -> RepositoryResult<()> {
        let id = self
            .set_id_by_name(name)?
            .ok_or_else(|| RepositoryError::NotFound(name.to_string()))?;
        let target = self
            .get_version(id, version)?
            .ok_or_else(|| RepositoryError::VersionNotFound {
                name: name.to_string(),
                version,
            })?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM commands WHERE command_set_id = ?1", [id])?;
        insert_commands(&tx, id, &target.commands)?;
        record_version_in(
            &tx,
            id,
            &SetMetadata::default(),
            &target.commands,
            Operation::Rollback,
        )?;
        tx.commit()?;
        Ok(())
    }

    fn touch_last_run(&self, set_id: i64) -> RepositoryResult<()> {
        self.conn.execute(
            "UPDATE command_sets SET last_run = datetime('now') WHERE id = ?1",
            [set_id],
        )?;
        Ok(())
    }
}

fn set_from_row(row: &Row<'_>) -> rusqlite::Result<CommandSet> {
    Ok(CommandSet {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        author_name: row.get(3)?,
        author_email: row.get(4)?,
        created_at: row.get(5)?,
        last_run: row.get(6)?,
        commands: Vec::new(),
        tags: Vec::new(),
    })
}

/// Version row before the JSON command list and operation are decoded.
struct RawVersion {
    id: i64,
    command_set_id: i64,
    version: i64,
    created_at: String,
    author_name: Option<String>,
    author_email: Option<String>,
    description: Option<String>,
    commands: String,
    operation: String,
}

impl RawVersion {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            command_set_id: row.get(1)?,
            version: row.get(2)?,
            created_at: row.get(3)?,
            author_name: row.get(4)?,
            author_email: row.get(5)?,
            description: row.get(6)?,
            commands: row.get(7)?,
            operation: row.get(8)?,
        })
    }

    fn into_version(self) -> RepositoryResult<Version> {
        let corrupted = |message: String| RepositoryError::CorruptedVersion {
            id: self.id,
            message,
        };
        let commands: Vec<String> =
            serde_json::from_str(&self.commands).map_err(|e| corrupted(e.to_string()))?;
        let operation: Operation = self.operation.parse().map_err(corrupted)?;
        Ok(Version {
            id: self.id,
            command_set_id: self.command_set_id,
            version: self.version,
            created_at: self.created_at,
            author_name: self.author_name,
            author_email: self.author_email,
            description: self.description,
            commands,
            operation,
        })
    }
}

/// Snapshot the set as a `delete` version, then remove it with its commands and tag links.
fn delete_set_in(conn: &Connection, id: i64) -> RepositoryResult<()> {
    let commands = command_texts(conn, id)?;
    record_version_in(conn, id, &SetMetadata::default(), &commands, Operation::Delete)?;
    conn.execute("DELETE FROM commands WHERE command_set_id = ?1", [id])?;
    conn.execute("DELETE FROM command_set_tags WHERE command_set_id = ?1", [id])?;
    conn.execute("DELETE FROM command_sets WHERE id = ?1", [id])?;
    Ok(())
}

fn insert_imported_in(
    conn: &Connection,
    meta: &SetMetadata,
    created_at: &str,
    last_run: Option<&str>,
    commands: &[String],
    tags: &[String],
    note: &str,
) -> RepositoryResult<i64> {
    let name = meta.name.trim();
    ensure_name_free(conn, name, 0)?;
    conn.execute(
        "INSERT INTO command_sets (name, description, author_name, author_email, created_at, last_run)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![name, meta.description, meta.author_name, meta.author_email, created_at, last_run],
    )?;
    let id = conn.last_insert_rowid();
    insert_commands(conn, id, commands)?;
    for tag in tags {
        attach_tag(conn, id, tag)?;
    }
    let version_meta = SetMetadata {
        name: name.to_string(),
        description: Some(note.to_string()),
        ..meta.clone()
    };
    record_version_in(conn, id, &version_meta, commands, Operation::Create)?;
    Ok(id)
}

fn non_blank(commands: &[String]) -> Vec<String> {
    commands
        .iter()
        .filter(|c| !c.trim().is_empty())
        .cloned()
        .collect()
}

fn insert_commands(conn: &Connection, set_id: i64, commands: &[String]) -> RepositoryResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO commands (command_set_id, position, command) VALUES (?1, ?2, ?3)",
    )?;
    for (i, cmd) in commands.iter().enumerate() {
        stmt.execute(params![set_id, i as i64 + 1, cmd])?;
    }
    Ok(())
}

fn command_texts(conn: &Connection, set_id: i64) -> RepositoryResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT command FROM commands WHERE command_set_id = ?1 ORDER BY position ASC, id ASC",
    )?;
    let rows = stmt.query_map([set_id], |r| r.get(0))?;
    Ok(rows.collect::<Result<Vec<String>, _>>()?)
}

fn tags_for(conn: &Connection, set_id: i64) -> RepositoryResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT t.name FROM tags t
         JOIN command_set_tags cst ON t.id = cst.tag_id
         WHERE cst.command_set_id = ?1
         ORDER BY t.name",
    )?;
    let rows = stmt.query_map([set_id], |r| r.get(0))?;
    Ok(rows.collect::<Result<Vec<String>, _>>()?)
}

fn attach_tag(conn: &Connection, set_id: i64, tag: &str) -> RepositoryResult<()> {
    conn.execute("INSERT OR IGNORE INTO tags (name) VALUES (?1)", [tag])?;
    let tag_id: i64 = conn.query_row("SELECT id FROM tags WHERE name = ?1", [tag], |r| r.get(0))?;
    conn.execute(
        "INSERT OR IGNORE INTO command_set_tags (command_set_id, tag_id) VALUES (?1, ?2)",
        [set_id, tag_id],
    )?;
    Ok(())
}

fn replace_tags(conn: &Connection, set_id: i64, tags: &[String]) -> RepositoryResult<()> {
    conn.execute("DELETE FROM command_set_tags WHERE command_set_id = ?1", [set_id])?;
    for tag in tags {
        attach_tag(conn, set_id, tag)?;
    }
    Ok(())
}

fn ensure_name_free(conn: &Connection, name: &str, set_id: i64) -> RepositoryResult<()> {
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM command_sets WHERE TRIM(name) = TRIM(?1)",
            [name],
            |r| r.get(0),
        )
        .optional()?;
    match existing {
        Some(other) if other != set_id => Err(RepositoryError::NameInUse(name.to_string())),
        _ => Ok(()),
    }
}

fn update_metadata(conn: &Connection, set_id: i64, meta: &SetMetadata) -> RepositoryResult<()> {
    let name = meta.name.trim();
    validate_name(name)?;
    conn.execute(
        "UPDATE command_sets SET name = ?1, description = ?2, author_name = ?3, author_email = ?4
         WHERE id = ?5",
        params![name, meta.description, meta.author_name, meta.author_email, set_id],
    )?;
    Ok(())
}

fn record_version_in(
    conn: &Connection,
    set_id: i64,
    meta: &SetMetadata,
    commands: &[String],
    operation: Operation,
) -> RepositoryResult<()> {
    let json = serde_json::to_string(commands).map_err(|e| RepositoryError::SanityCheck(e.to_string()))?;
    let next: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) + 1 FROM command_set_versions WHERE command_set_id = ?1",
        [set_id],
        |r| r.get(0),
    )?;
    conn.execute(
        "INSERT INTO command_set_versions
         (command_set_id, version, created_at, author_name, author_email, description, commands, operation)
         VALUES (?1, ?2, datetime('now'), ?3, ?4, ?5, ?6, ?7)",
        params![
            set_id,
            next,
            meta.author_name,
            meta.author_email,
            meta.description,
            json,
            operation.as_str()
        ],
    )?;
    Ok(())
}
