//! Pipeline orchestration module.
//!
//! Main message ingestion pipeline that coordinates:
//! - Classification
//! - Segmentation
//! - Field extraction and normalization
//! - Row assembly
//! - Hand-off to a row sink

pub mod context;
pub mod ingestion;

pub use context::*;
pub use ingestion::*;
