//! Storage module.
//!
//! Extracted records, their sheet-row layout, and the sinks rows are
//! written to.

pub mod models;
pub mod rows;
pub mod sink;

pub use models::*;
pub use rows::*;
pub use sink::*;
