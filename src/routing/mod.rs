//! Report classification module.
//!
//! Determines which pipeline a chat message is parsed with:
//! - Maintenance visit reports (checked first)
//! - Outage reports (default)

pub mod decision;
pub mod markers;

pub use decision::*;
pub use markers::*;
