//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `db/` - SQLite connection setup and schema
//! - `repositories/` - SQLite command sets, JSON profile
//! - `executor/` - Shell execution with timeouts
//! - `transfer/` - Database and single-set export/import
//! - `install/` - Self-install, status and uninstall
//! - `fs/` - Atomic writes, home directory, PATH lookup

pub mod db;
pub mod editor;
pub mod executor;
pub mod fs;
pub mod install;
pub mod repositories;
pub mod transfer;

// Re-export for convenience
pub use executor::ShellExecutor;
pub use repositories::{JsonProfileRepository, SqliteCommandSetRepository};
