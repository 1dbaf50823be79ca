//! Shared utilities: error types, constants and time helpers.

pub mod constants;
pub mod error;
pub mod time;
