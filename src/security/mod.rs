//! Security module.
//!
//! Size limits and prefix cleanup for incoming chat text, and formula
//! detection for outgoing sheet cells.

pub mod sanitizer;

pub use sanitizer::*;
