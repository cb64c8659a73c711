//! Value normalization module.
//!
//! Maps free text onto the fixed vocabularies the sheets use:
//! - Customer group detection
//! - Activity, action-type and modem-type vocabularies
//! - Notes composition (UPS phrasing, status remarks, ex-location)
//! - Visit duration

pub mod customer;
pub mod duration;
pub mod notes;
pub mod vocabulary;

pub use customer::*;
pub use duration::*;
pub use notes::*;
pub use vocabulary::*;
