//! Plain-text renderings of registry data.
//!
//! Views return `String`s so commands can print them and tests can snapshot
//! them.

pub mod describe;
pub mod history;
pub mod status;

pub use describe::{browse_labels, render_describe, render_list};
pub use history::render_history;
pub use status::{render_plan, render_status};
