//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure provides the concrete implementations.

pub mod command_runner;
pub mod command_set_repository;
pub mod profile_repository;
pub mod prompter;

pub use command_runner::{CommandRunner, ExecError, ExecIo};
pub use command_set_repository::{CommandSetRepository, RepositoryError, RepositoryResult, SetMetadata};
pub use profile_repository::{Profile, ProfileError, ProfileRepository};
pub use prompter::{NoPrompt, Prompter, ScriptedPrompter};
