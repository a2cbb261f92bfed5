//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `RegistryUseCase` - Save, edit, tag, delete and roll back command sets
//! - `RunUseCase` - Resolve parameters, enforce the denylist and execute a set

pub mod registry;
pub mod run;

pub use registry::RegistryUseCase;
pub use run::{RunOptions, RunOutcome, RunUseCase};
