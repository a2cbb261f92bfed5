//! Run Module
//!
//! Executes a stored command set.
//!
//! ## Structure
//!
//! - `options` - Flags of a single run (`RunOptions`)
//! - `use_case` - Parameter resolution, denylist, execution (`RunUseCase`)

mod options;
mod use_case;

pub use options::{RunOptions, RunOutcome};
pub use use_case::RunUseCase;
