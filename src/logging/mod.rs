//! Structured logging with message context.
//!
//! Provides logging macros and utilities that include message_id and block
//! index in every log message for easy correlation.

pub mod structured;

pub use structured::*;
