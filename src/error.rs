//! Error types.
//!
//! None of these are fatal to a message: extraction errors stop at the block
//! boundary and sink errors stop at the row boundary.

use thiserror::Error;

/// Failure while turning one text block into a record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("block has no non-empty lines")]
    EmptyBlock,
    #[error("internal extraction fault: {0}")]
    Internal(String),
}

/// Failure while handing a row to the sink.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("no empty row in {sheet}!B{first_row}:B{last_row}")]
    WindowFull {
        sheet: String,
        first_row: usize,
        last_row: usize,
    },
    #[error("row rejected by sink: {0}")]
    Rejected(String),
    #[error("sink I/O failed: {0}")]
    Io(String),
}

/// Failure while loading or validating [`crate::config::SheetConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read sheet config: {0}")]
    Read(String),
    #[error("failed to parse sheet config: {0}")]
    Parse(String),
    #[error("invalid sheet config: {0}")]
    Invalid(String),
}
