//! Domain Policies
//!
//! Business rules that govern behavior.
//! These are pure functions that operate on domain values.

mod security;

pub use security::{is_secret_param_name, CommandPolicy, InvalidDenyPattern, PolicyViolation};
