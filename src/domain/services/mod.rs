//! Domain Services
//!
//! Pure business logic that operates on domain entities.
//! These services have no I/O dependencies beyond the readers they are handed.

mod command_text;
mod differ;
mod fuzzy;
mod merge;
mod recorder;

pub use command_text::{prepare_command, sanitize_command, validate_command, CommandTextError};
pub use differ::{diff_commands, DiffLine, DiffResult, DiffTag};
pub use fuzzy::{fuzzy_match, matches_command_set};
pub use merge::merge_commands;
pub use recorder::record_commands;
