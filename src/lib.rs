//! krnr - a global, SQLite-backed registry of named terminal workflows
//!
//! Command sets are saved once and run from anywhere. Every change is
//! versioned, commands are checked against a denylist before they run, and
//! registries can be exported and imported as portable SQLite files.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{RegistryUseCase, RunOptions, RunOutcome, RunUseCase};
pub use config::Config;
pub use domain::entities::{CommandSet, Operation, Version};
pub use domain::ports::{CommandSetRepository, SetMetadata};
pub use error::{KrnrError, KrnrResult};
pub use infrastructure::{ShellExecutor, SqliteCommandSetRepository};

/// Version string, injected at build time through `KRNR_VERSION`.
pub fn version() -> &'static str {
    option_env!("KRNR_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}
