//! Error types for krnr
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{ExecError, ProfileError, RepositoryError};
use crate::domain::policies::InvalidDenyPattern;
use crate::domain::value_objects::{InvalidParamFlag, MissingParams};

/// Result type alias for krnr operations
pub type KrnrResult<T> = Result<T, KrnrError>;

/// Main error type for krnr operations
#[derive(Error, Debug)]
pub enum KrnrError {
    /// Name rejected by validation
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// Lookup by name failed
    #[error("command set not found: {0}")]
    NotFound(String),

    /// Rollback target does not exist
    #[error("version {version} not found for {name}")]
    VersionNotFound { name: String, version: i64 },

    /// Rollback requested with a zero or negative version
    #[error("--version must be a positive integer")]
    InvalidVersion(i64),

    /// One or more `{{param}}` placeholders had no value
    #[error("missing parameters: {}", .0.join(", "))]
    MissingParams(Vec<String>),

    /// Prompted parameter came back empty
    #[error("missing value for parameter {0}")]
    MissingParamValue(String),

    /// Malformed `--param` flag
    #[error("invalid --param value: {0} (expected name=value)")]
    InvalidParamFlag(String),

    /// Denylist hit during `run`
    #[error("refusing to run potentially dangerous command '{command}': {reason} (use --force to override)")]
    Refused { command: String, reason: String },

    /// Storage failure
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Shell execution failure
    #[error(transparent)]
    Exec(#[from] ExecError),

    /// whoami.json could not be read or written
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Import conflict policy not recognised
    #[error("unknown on-conflict policy: {0}")]
    UnknownPolicy(String),

    /// Import would clobber the active database
    #[error("destination database exists; use overwrite=true to replace or specify --on-conflict to merge")]
    DestinationExists,

    /// Source file for import is missing
    #[error("source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Install/uninstall failure with a human-readable reason
    #[error("{0}")]
    Install(String),

    /// Editor exited unsuccessfully
    #[error("open editor: {0}")]
    Editor(String),

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Data directory could not be resolved
    #[error("data dir not available: could not determine home directory")]
    NoDataDir,

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Interactive prompt was aborted by the user
    #[error("aborted by user")]
    Aborted,

    /// Ctrl-C between commands of a run
    #[error("interrupted")]
    Interrupted,

    /// `[security] extra_deny` holds a pattern that does not compile
    #[error(transparent)]
    DenyPattern(#[from] InvalidDenyPattern),
}

impl From<rusqlite::Error> for KrnrError {
    fn from(err: rusqlite::Error) -> Self {
        KrnrError::Repository(RepositoryError::Database(err))
    }
}

impl From<MissingParams> for KrnrError {
    fn from(err: MissingParams) -> Self {
        KrnrError::MissingParams(err.missing)
    }
}

impl From<InvalidParamFlag> for KrnrError {
    fn from(err: InvalidParamFlag) -> Self {
        KrnrError::InvalidParamFlag(err.0)
    }
}
