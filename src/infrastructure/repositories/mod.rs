//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod command_set;
mod profile;

pub use command_set::SqliteCommandSetRepository;
pub use profile::JsonProfileRepository;
