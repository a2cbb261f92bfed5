//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod conflict_policy;
mod hash;
mod name;
mod params;

pub use config_warning::ConfigWarning;
pub use conflict_policy::ConflictPolicy;
pub use hash::ContentHash;
pub use name::{sanitize_name, validate_name, NameError};
pub use params::{
    apply_params, find_params, parse_param_flag, InvalidParamFlag, MissingParams, ParamValue, Params,
};
