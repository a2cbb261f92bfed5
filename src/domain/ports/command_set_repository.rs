//! CommandSetRepository port
//!
//! Persistence of command sets, their commands, tags and version history.

use crate::domain::entities::{CommandSet, Operation, Version};
use crate::domain::value_objects::NameError;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Editable metadata of a command set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetMetadata {
    pub name: String,
    pub description: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
}

impl SetMetadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

pub trait CommandSetRepository {
    /// Insert a set and its non-blank `initial_commands`; records version 1.
    fn create_command_set(&self, meta: &SetMetadata, initial_commands: &[String]) -> RepositoryResult<i64>;

    fn add_command(&self, set_id: i64, position: i64, command: &str) -> RepositoryResult<i64>;

    fn get_command_set_by_name(&self, name: &str) -> RepositoryResult<Option<CommandSet>>;

    /// Newest first, with tags but without commands.
    fn list_command_sets(&self) -> RepositoryResult<Vec<CommandSet>>;

    /// Rename/re-describe a set and replace its tags.
    fn update_command_set(&self, set_id: i64, meta: &SetMetadata, tags: &[String]) -> RepositoryResult<()>;

    /// Metadata, tags and commands in one transaction, one `update` version.
    fn update_command_set_and_replace_commands(
        &self,
        set_id: i64,
        meta: &SetMetadata,
        tags: &[String],
        commands: &[String],
    ) -> RepositoryResult<()>;

    fn replace_commands(&self, set_id: i64, commands: &[String]) -> RepositoryResult<()>;

    /// No-op for unknown names.
    fn delete_command_set(&self, name: &str) -> RepositoryResult<()>;

    fn add_tag_to_command_set(&self, set_id: i64, tag: &str) -> RepositoryResult<()>;
    fn remove_tag_from_command_set(&self, set_id: i64, tag: &str) -> RepositoryResult<()>;
    fn list_tags_for_command_set(&self, set_id: i64) -> RepositoryResult<Vec<String>>;
    fn list_command_sets_by_tag(&self, tag: &str) -> RepositoryResult<Vec<CommandSet>>;

    fn search_command_sets(&self, query: &str) -> RepositoryResult<Vec<CommandSet>>;
    fn fuzzy_search_command_sets(&self, query: &str) -> RepositoryResult<Vec<CommandSet>>;

    fn record_version(
        &self,
        set_id: i64,
        meta: &SetMetadata,
        commands: &[String],
        operation: Operation,
    ) -> RepositoryResult<()>;

    /// Newest first.
    fn list_versions(&self, set_id: i64) -> RepositoryResult<Vec<Version>>;
    /// Empty for unknown names.
    fn list_versions_by_name(&self, name: &str) -> RepositoryResult<Vec<Version>>;
    fn get_version(&self, set_id: i64, version: i64) -> RepositoryResult<Option<Version>>;
    /// Restore the commands of `version` and record a `rollback` version.
    fn apply_version_by_name(&self, name: &str, version: i64) -> RepositoryResult<()>;

    fn touch_last_run(&self, set_id: i64) -> RepositoryResult<()>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("name {0:?} already in use")]
    NameInUse(String),

    #[error("command set not found: {0}")]
    NotFound(String),

    #[error("version {version} not found for {name}")]
    VersionNotFound { name: String, version: i64 },

    #[error("sanity check failed: {0}")]
    SanityCheck(String),

    #[error("corrupted version record {id}: {message}")]
    CorruptedVersion { id: i64, message: String },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
