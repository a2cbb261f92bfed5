//! Domain Layer
//!
//! The core of krnr: command sets, their versions, and the rules that apply
//! to them. Nothing here touches SQLite, the shell, or the file system.
//!
//! ## Structure
//!
//! - `entities/` - Command sets, commands, and version snapshots
//! - `value_objects/` - Names, parameters, conflict policies, content hashes
//! - `services/` - Fuzzy matching, recording, command text hygiene, merging
//! - `policies/` - The command denylist and secret-parameter detection
//! - `ports/` - Interfaces implemented by the infrastructure layer

pub mod entities;
pub mod policies;
pub mod ports;
pub mod services;
pub mod value_objects;
