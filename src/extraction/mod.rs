//! Field extraction module.
//!
//! Turns one text block into one record by matching each line against an
//! ordered table of field rules.

pub mod lines;
pub mod maintenance;
pub mod outage;

pub use lines::*;
pub use maintenance::*;
pub use outage::*;
