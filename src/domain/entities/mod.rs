//! Domain Entities
//!
//! - `CommandSet` - A named, ordered list of shell commands
//! - `Version` - An immutable snapshot of a set's commands

mod command_set;
mod version;

pub use command_set::{Command, CommandSet};
pub use version::{Operation, Version};
