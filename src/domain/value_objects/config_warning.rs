//! Configuration warning value object.

use std::path::PathBuf;

/// Non-fatal configuration warning surfaced to CLI users, e.g. an unknown
/// key in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    /// 1-indexed, when the key could be located
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}
