//! Home directory resolution with test isolation support.
//!
//! On Windows, `dirs::home_dir()` asks the system API rather than reading
//! `HOME`/`USERPROFILE`, so tests cannot redirect it through those variables.
//! Everything krnr derives from the home directory (the default data dir,
//! the user bin dir, shell rc files) goes through [`krnr_home_dir`] instead.

use std::path::PathBuf;

/// Overrides the home directory for krnr-internal paths.
pub const KRNR_TEST_HOME_VAR: &str = "KRNR_TEST_HOME";

/// `$KRNR_TEST_HOME` when set, else the system home directory.
pub fn krnr_home_dir() -> Option<PathBuf> {
    std::env::var(KRNR_TEST_HOME_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}
