//! Input and output hygiene for chat text and sheet cells.
//!
//! - Size limit on incoming messages
//! - Removal of copied chat-forward prefixes ("[10:21, 5/10/2025] Budi: ")
//! - Detection of cells a spreadsheet would evaluate as formulas
//!
//! Detections on cells are logged, not rewritten: rows are written with
//! USER_ENTERED semantics by the sink and the operator sees the raw value.

use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::logging::structured::LogContext;

/// Largest message the engine will parse.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

lazy_static! {
    static ref FORWARD_PREFIX: Regex = Regex::new(r"(?m)^\[[^\]]+\]\s*[^:\n]*:\s*").unwrap();

    /// Cell prefixes a spreadsheet treats as the start of a formula.
    static ref FORMULA_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"^=").unwrap(),
        Regex::new(r"^\+[^\d\s]").unwrap(),
        Regex::new(r"^@").unwrap(),
    ];
}

/// Check a message against the size limit.
pub fn within_size_limit(text: &str, ctx: &LogContext) -> bool {
    if text.len() > MAX_MESSAGE_SIZE {
        log::warn!(
            "{} SIZE_LIMIT_EXCEEDED size={} limit={}",
            ctx,
            text.len(),
            MAX_MESSAGE_SIZE
        );
        return false;
    }
    true
}

/// Remove "[time, date] Name: " prefixes left by copy-pasted chat lines.
pub fn strip_forward_prefixes(text: &str) -> String {
    FORWARD_PREFIX.replace_all(text, "").into_owned()
}

/// Count row cells that would be evaluated as formulas.
pub fn scan_row_cells(cells: &[String], ctx: &LogContext) -> usize {
    let mut detections = 0;
    for (idx, cell) in cells.iter().enumerate() {
        for pattern in FORMULA_PATTERNS.iter() {
            if pattern.is_match(cell.trim_start()) {
                log::debug!(
                    "{} PATTERN_DETECTED type=formula column={} pattern={}",
                    ctx,
                    idx,
                    pattern.as_str()
                );
                detections += 1;
            }
        }
    }

    if detections > 0 {
        log::warn!("{} FORMULA_CELLS_DETECTED count={}", ctx, detections);
    }
    detections
}

/// SHA-256 of content, hex encoded. Used to correlate dropped blocks in logs
/// without logging the chat text.
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_strip_forward_prefixes() {
        let text = "[10:21, 5/10/2025] Budi: ATMI\n[10:22, 5/10/2025] Budi: Area: Bekasi\nPukul: 14:00";
        assert_eq!(
            strip_forward_prefixes(text),
            "ATMI\nArea: Bekasi\nPukul: 14:00"
        );
    }

    #[test]
    fn test_strip_is_noop_on_plain_text() {
        let text = "ATMI\nID01 - Mall\nArea: Jaksel";
        assert_eq!(strip_forward_prefixes(text), text);
    }

    #[test]
    fn test_size_limit() {
        let ctx = LogContext::new("test-msg");
        assert!(within_size_limit("ATMI", &ctx));
        assert!(!within_size_limit(&"x".repeat(MAX_MESSAGE_SIZE + 1), &ctx));
    }

    #[test]
    fn test_formula_detection() {
        let ctx = LogContext::new("test-msg");
        assert_eq!(scan_row_cells(&cells(&["", "ATMi", "=HYPERLINK(\"x\")"]), &ctx), 1);
        assert_eq!(scan_row_cells(&cells(&["@SUM(A1)", "+cmd"]), &ctx), 2);
        assert_eq!(scan_row_cells(&cells(&["+62 812 000", "- cek kabel", "14:00"]), &ctx), 0);
    }

    #[test]
    fn test_content_hash() {
        let hash = content_hash("ATMI\nID01");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, content_hash("ATMI\nID01"));
        assert_ne!(hash, content_hash("ATMI\nID02"));
    }
}
