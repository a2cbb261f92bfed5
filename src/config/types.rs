//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::KrnrResult;

use super::loader;
use super::ConfigWarning;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `[run]`: how command sets are executed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Shell override; the platform shell when unset.
    #[serde(default)]
    pub shell: Option<String>,

    /// Per-command timeout. `0` disables it.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub show_stderr: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            shell: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            show_stderr: false,
        }
    }
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// `[security]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SecurityConfig {
    /// Regexes added to the built-in denylist.
    #[serde(default)]
    pub extra_deny: Vec<String>,
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub security: SecurityConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> KrnrResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> KrnrResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// `<data dir>/config.toml` if present and valid, else defaults; env applied.
    pub fn load_or_default() -> Self {
        loader::load_or_default()
    }

    /// Apply environment variable overrides (KRNR_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |k| std::env::var(k).ok())
    }
}
