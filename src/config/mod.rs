//! Configuration module for krnr
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (KRNR_*)
//! 3. `<data dir>/config.toml`
//! 4. Built-in defaults (lowest priority)

mod loader;
mod paths;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use paths::{
    config_path, data_dir, db_path, default_shell_hint, ensure_data_dir, ENV_DB, ENV_HOME,
};
pub use types::{ColorMode, Config, OutputConfig, RunConfig, SecurityConfig, DEFAULT_TIMEOUT_SECS};
