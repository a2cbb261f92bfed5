//! Registry Module
//!
//! Management of stored command sets on top of `CommandSetRepository`.

mod use_case;

pub use use_case::RegistryUseCase;
