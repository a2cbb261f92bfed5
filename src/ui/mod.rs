//! Terminal presentation for the krnr binary.
//!
//! - `context` - resolved output settings (`UiContext`)
//! - `theme` - colors, icons and the dialoguer theme
//! - `json` - NDJSON events for `--json`
//! - `views` - text renderings of sets, history and install status
//! - `prompt` - `Prompter` implementations for terminals and pipes
//! - `sanitize` - escape-sequence clean-up for captured output

pub mod context;
pub mod diff;
pub mod error;
pub mod json;
pub mod output;
pub mod prompt;
pub mod sanitize;
pub mod terminal;
pub mod theme;
pub mod views;
