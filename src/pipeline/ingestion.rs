//! Main message ingestion pipeline.
//!
//! Coordinates the full message processing workflow:
//! 1. Size limit
//! 2. Classification (maintenance first)
//! 3. Segmentation into blocks
//! 4. Per-block extraction behind a panic boundary
//! 5. Dropping unattributed blocks
//! 6. Outage fallback when maintenance yields nothing
//! 7. Row assembly and best-effort hand-off to the sink

use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::SheetConfig;
use crate::error::{ExtractError, SinkError};
use crate::extraction::maintenance::extract_maintenance;
use crate::extraction::outage::extract_outage;
use crate::logging::structured::LogContext;
use crate::normalize::customer::CustomerGroup;
use crate::routing::decision::{classify, ReportKind};
use crate::security::sanitizer::{
    content_hash, scan_row_cells, strip_forward_prefixes, within_size_limit,
};
use crate::segmentation::blocks::{segment_maintenance, segment_outage, TextBlock};
use crate::storage::models::{MaintenanceRecord, OutageRecord, RawMessage};
use crate::storage::rows::{assemble_maintenance_row, assemble_outage_row, Row};
use crate::storage::sink::{AppendOutcome, RowSink};
use crate::{log_debug, log_info, log_warn};

use super::context::MessageContext;

const PREVIEW_CHARS: usize = 50;

/// Why a block produced no row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum DropReason {
    /// No customer group could be detected.
    Unparsed,
    /// Extraction failed or panicked.
    ExtractFailed { error: String },
}

/// A block that was skipped. Only a hash of its text is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedBlock {
    /// 1-based position in the message.
    pub index: usize,
    pub content_hash: String,
    #[serde(flatten)]
    pub reason: DropReason,
}

/// Records extracted from one message, each tagged with its block index.
#[derive(Debug, Clone)]
pub struct ParsedBlocks<R> {
    pub records: Vec<(usize, R)>,
    pub dropped: Vec<DroppedBlock>,
}

/// Rows ready for the sink.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub kind: ReportKind,
    pub rows: Vec<(usize, Row)>,
    pub dropped: Vec<DroppedBlock>,
}

/// A row the sink refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub block: usize,
    pub sheet: String,
    pub error: String,
}

/// Result of processing one message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageOutcome {
    pub message_id: String,
    pub kind: Option<ReportKind>,
    pub written: Vec<AppendOutcome>,
    pub failed: Vec<RowFailure>,
    pub dropped: Vec<DroppedBlock>,
    pub rejection_reason: Option<String>,
}

impl MessageOutcome {
    fn rejected(message_id: &str, reason: String) -> Self {
        Self {
            message_id: message_id.to_string(),
            kind: None,
            written: Vec::new(),
            failed: Vec::new(),
            dropped: Vec::new(),
            rejection_reason: Some(reason),
        }
    }
}

/// Run `extract` on one block, converting a panic into an error.
fn guarded<R>(
    block: &TextBlock,
    ctx: &LogContext,
    extract: impl Fn(&TextBlock, &LogContext) -> Result<R, ExtractError>,
) -> Result<R, ExtractError> {
    match catch_unwind(AssertUnwindSafe(|| extract(block, ctx))) {
        Ok(result) => result,
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(ExtractError::Internal(detail))
        }
    }
}

fn extract_blocks<R>(
    blocks: Vec<TextBlock>,
    ctx: &LogContext,
    customer_of: impl Fn(&R) -> Option<CustomerGroup>,
    extract: impl Fn(&TextBlock, &LogContext) -> Result<R, ExtractError>,
) -> ParsedBlocks<R> {
    let mut records = Vec::new();
    let mut dropped = Vec::new();

    for (offset, block) in blocks.iter().enumerate() {
        let index = offset + 1;
        let block_ctx = ctx.with_block(index);
        log_debug!(block_ctx, "BLOCK_START", preview = block.preview(PREVIEW_CHARS));

        let reason = match guarded(block, &block_ctx, &extract) {
            Ok(record) if customer_of(&record).is_some() => {
                records.push((index, record));
                continue;
            }
            Ok(_) => DropReason::Unparsed,
            Err(e) => {
                log_warn!(block_ctx, "EXTRACT_FAILED", error = e.to_string());
                DropReason::ExtractFailed {
                    error: e.to_string(),
                }
            }
        };

        let hash = content_hash(&block.text());
        log_info!(block_ctx, "BLOCK_DROPPED", reason = reason, content_hash = hash);
        dropped.push(DroppedBlock {
            index,
            content_hash: hash,
            reason,
        });
    }

    ParsedBlocks { records, dropped }
}

/// Segment and extract a maintenance message.
pub fn parse_maintenance_message(text: &str, ctx: &LogContext) -> ParsedBlocks<MaintenanceRecord> {
    let blocks = segment_maintenance(text);
    log_debug!(ctx, "SEGMENTED", kind = "maintenance", blocks = blocks.len());
    extract_blocks(blocks, ctx, |r: &MaintenanceRecord| r.customer, extract_maintenance)
}

/// Segment and extract an outage message. Chat-forward prefixes are removed
/// first so that forwarded header lines are still recognized.
pub fn parse_outage_message(
    text: &str,
    today: NaiveDate,
    ctx: &LogContext,
) -> ParsedBlocks<OutageRecord> {
    let cleaned = strip_forward_prefixes(text);
    let blocks = segment_outage(&cleaned);
    log_debug!(ctx, "SEGMENTED", kind = "outage", blocks = blocks.len());
    extract_blocks(blocks, ctx, |r: &OutageRecord| r.customer, |block, block_ctx| {
        extract_outage(block, today, block_ctx)
    })
}

/// Classify, extract and assemble rows without touching a sink.
///
/// Maintenance is tried first; if it yields no usable record the message is
/// parsed again as an outage report.
pub fn extract_rows(text: &str, today: NaiveDate, ctx: &LogContext) -> Extraction {
    let mut dropped = Vec::new();

    if classify(text, ctx) == ReportKind::Maintenance {
        let parsed = parse_maintenance_message(text, ctx);
        if !parsed.records.is_empty() {
            return Extraction {
                kind: ReportKind::Maintenance,
                rows: parsed
                    .records
                    .iter()
                    .map(|(idx, rec)| (*idx, assemble_maintenance_row(rec)))
                    .collect(),
                dropped: parsed.dropped,
            };
        }
        log_info!(ctx, "FALLBACK_TO_OUTAGE", dropped = parsed.dropped.len());
        dropped = parsed.dropped;
    }

    let parsed = parse_outage_message(text, today, ctx);
    dropped.extend(parsed.dropped);
    Extraction {
        kind: ReportKind::Outage,
        rows: parsed
            .records
            .iter()
            .map(|(idx, rec)| (*idx, assemble_outage_row(rec)))
            .collect(),
        dropped,
    }
}

/// Process one message end to end.
///
/// Main entry point. Rows are appended in block order; a sink failure on one
/// row is logged and the remaining rows are still attempted.
pub fn process_message(
    message: &RawMessage,
    cfg: &SheetConfig,
    sink: &dyn RowSink,
) -> MessageOutcome {
    let msg_ctx = MessageContext::new(message);
    let ctx = msg_ctx.log_context();

    log_info!(
        ctx,
        "MESSAGE_RECEIVED",
        origin = msg_ctx.origin_id,
        at = msg_ctx.formatted_timestamp(cfg),
        size = message.text.len()
    );

    if !within_size_limit(&message.text, &ctx) {
        return MessageOutcome::rejected(
            &msg_ctx.message_id,
            format!("message exceeds {} bytes", crate::security::MAX_MESSAGE_SIZE),
        );
    }

    let extraction = extract_rows(&message.text, msg_ctx.today(cfg), &ctx);
    let sheet = cfg.sheet_name(extraction.kind, msg_ctx.received_at).to_string();

    let mut written = Vec::new();
    let mut failed = Vec::new();
    for (index, row) in &extraction.rows {
        let block_ctx = ctx.with_block(*index);
        scan_row_cells(&row.cells, &block_ctx);

        match sink.append(row, &sheet) {
            Ok(outcome) => {
                log_info!(
                    block_ctx,
                    "ROW_APPENDED",
                    sheet = outcome.sheet,
                    row = outcome.row_number,
                    range = outcome.updated_range
                );
                written.push(outcome);
            }
            Err(e) => {
                log_warn!(block_ctx, "ROW_APPEND_FAILED", sheet = sheet, error = e.to_string());
                failed.push(row_failure(*index, &sheet, &e));
            }
        }
    }

    log_info!(
        ctx,
        "MESSAGE_COMPLETE",
        kind = extraction.kind.as_str(),
        written = written.len(),
        failed = failed.len(),
        dropped = extraction.dropped.len()
    );

    MessageOutcome {
        message_id: msg_ctx.message_id,
        kind: Some(extraction.kind),
        written,
        failed,
        dropped: extraction.dropped,
        rejection_reason: None,
    }
}

fn row_failure(block: usize, sheet: &str, error: &SinkError) -> RowFailure {
    RowFailure {
        block,
        sheet: sheet.to_string(),
        error: error.to_string(),
    }
}
