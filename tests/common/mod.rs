//! Common test utilities for krnr integration tests.
//!
//! This module provides:
//! - `TestEnv`: an isolated data directory plus helpers to run the binary
//! - Assertion macros: `assert_output_contains!`, `assert_success!`

#![allow(dead_code)]

pub mod env;

pub use env::*;
