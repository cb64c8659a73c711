//! Message segmentation module.
//!
//! Splits a chat message into one text block per reported incident or visit.

pub mod blocks;

pub use blocks::*;
