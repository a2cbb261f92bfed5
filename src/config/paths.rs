//! Where krnr keeps its data.

use std::fs;
use std::path::PathBuf;

use crate::error::{KrnrError, KrnrResult};
use crate::infrastructure::fs::krnr_home_dir;

/// Overrides the data directory.
pub const ENV_HOME: &str = "KRNR_HOME";
/// Overrides the database file.
pub const ENV_DB: &str = "KRNR_DB";

/// `$KRNR_HOME`, else `~/.krnr`.
pub fn data_dir() -> KrnrResult<PathBuf> {
    resolve_data_dir(|k| std::env::var(k).ok(), krnr_home_dir())
}

/// [`data_dir`], created if missing.
pub fn ensure_data_dir() -> KrnrResult<PathBuf> {
    let dir = data_dir()?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// `$KRNR_DB`, else `<data dir>/krnr.db`.
pub fn db_path() -> KrnrResult<PathBuf> {
    resolve_db_path(|k| std::env::var(k).ok(), krnr_home_dir())
}

pub fn config_path() -> KrnrResult<PathBuf> {
    Ok(data_dir()?.join("config.toml"))
}

/// How commands are handed to the shell, for help text.
pub fn default_shell_hint() -> &'static str {
    if cfg!(windows) {
        "cmd /C <cmd> or pwsh -Command <cmd>"
    } else {
        "bash -c <cmd>"
    }
}

pub(crate) fn resolve_data_dir(
    env: impl Fn(&str) -> Option<String>,
    home: Option<PathBuf>,
) -> KrnrResult<PathBuf> {
    if let Some(dir) = env(ENV_HOME).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    home.map(|h| h.join(".krnr")).ok_or(KrnrError::NoDataDir)
}

pub(crate) fn resolve_db_path(
    env: impl Fn(&str) -> Option<String>,
    home: Option<PathBuf>,
) -> KrnrResult<PathBuf> {
    if let Some(db) = env(ENV_DB).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(db));
    }
    Ok(resolve_data_dir(env, home)?.join("krnr.db"))
}
