//! ATMLog Core - Chat-report extraction engine
//!
//! Turns free-form chat reports about ATM outages and maintenance visits into
//! fixed-layout sheet rows. The implementation prioritizes:
//!
//! 1. **Isolation** - One bad block never suppresses its siblings
//! 2. **Logging** - Every decision point logged with message/block context
//! 3. **Auditability** - Ordered rule tables, evaluated first-match-wins
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `pipeline` - Main ingestion orchestrator
//! - `routing` - Maintenance vs outage classification
//! - `segmentation` - Splitting a message into per-entity blocks
//! - `extraction` - Line-by-line field extraction per block
//! - `normalize` - Closed vocabularies, customer groups, notes, durations
//! - `storage` - Records, row layouts and row sinks
//! - `security` - Size limits, forward-prefix cleanup, formula scan
//! - `config` - Injected sheet routing configuration
//! - `logging` - Structured logging with message context

pub mod config;
pub mod error;
pub mod extraction;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod routing;
pub mod security;
pub mod segmentation;
pub mod storage;

pub use config::SheetConfig;
pub use error::{ConfigError, ExtractError, SinkError};
pub use pipeline::ingestion::{extract_rows, process_message, MessageOutcome};
pub use routing::decision::ReportKind;
pub use storage::models::{MaintenanceRecord, OutageRecord, RawMessage};
pub use storage::rows::Row;
pub use storage::sink::{AppendOutcome, GridSink, RowSink};

/// Initialize the process-wide logger. Safe to call more than once.
pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}
