//! Block segmentation.
//!
//! One chat message may report several incidents or visits. A recognized
//! header line starts a new block; every other non-empty line belongs to the
//! block that is currently open. Lines before the first header are dropped.

use lazy_static::lazy_static;
use regex::Regex;

use crate::normalize::customer::is_bare_group_line;
use crate::routing::ReportKind;

lazy_static! {
    static ref PREVENTIVE_HEADER: Regex = Regex::new(r"(?i)preventive\s+maintenance").unwrap();
    static ref OPEN_TICKET_HEADER: Regex = Regex::new(r"(?i)open\s*ti(?:c)?ket").unwrap();
}

/// Trimmed, non-empty lines describing one incident or visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    lines: Vec<String>,
}

impl TextBlock {
    pub fn new(header: &str) -> Self {
        Self {
            lines: vec![header.to_string()],
        }
    }

    /// Build a block from arbitrary text, keeping only trimmed non-empty lines.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn header(&self) -> Option<&str> {
        self.lines.first().map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The block's lines rejoined with newlines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Short single-line preview for log output.
    pub fn preview(&self, max_chars: usize) -> String {
        let flat = self.lines.join(" | ");
        let mut out: String = flat.chars().take(max_chars).collect();
        if flat.chars().count() > max_chars {
            out.push_str("...");
        }
        out
    }
}

/// Which lines open a new block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderRule {
    /// A bare customer-group name only.
    CustomerGroup,
    /// A bare customer-group name, or a Preventive Maintenance / Open Ticket line.
    CustomerGroupOrActivity,
}

impl HeaderRule {
    pub fn for_kind(kind: ReportKind) -> Self {
        match kind {
            ReportKind::Outage => HeaderRule::CustomerGroup,
            ReportKind::Maintenance => HeaderRule::CustomerGroupOrActivity,
        }
    }

    pub fn is_header(&self, line: &str) -> bool {
        match self {
            HeaderRule::CustomerGroup => is_bare_group_line(line),
            HeaderRule::CustomerGroupOrActivity => {
                is_bare_group_line(line)
                    || PREVENTIVE_HEADER.is_match(line)
                    || OPEN_TICKET_HEADER.is_match(line)
            }
        }
    }
}

/// Split raw text into blocks, in source order. Single pass over the lines.
pub fn segment(raw: &str, rule: HeaderRule) -> Vec<TextBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<TextBlock> = None;

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if rule.is_header(line) {
            if let Some(done) = current.take() {
                blocks.push(done);
            }
            current = Some(TextBlock::new(line));
        } else if let Some(block) = current.as_mut() {
            block.push(line);
        }
    }

    if let Some(done) = current {
        blocks.push(done);
    }
    blocks
}

pub fn segment_outage(raw: &str) -> Vec<TextBlock> {
    segment(raw, HeaderRule::CustomerGroup)
}

pub fn segment_maintenance(raw: &str) -> Vec<TextBlock> {
    segment(raw, HeaderRule::CustomerGroupOrActivity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_header_single_block() {
        let blocks = segment_outage("ATMI\nID01 - Mall Besar\n\n  Area: Jaksel  ");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].lines(), ["ATMI", "ID01 - Mall Besar", "Area: Jaksel"]);
        assert_eq!(blocks[0].header(), Some("ATMI"));
    }

    #[test]
    fn test_multiple_blocks_in_order() {
        let blocks = segment_outage("ATMI\nID01 - A\nBRINKS\nID02 - B\njalin \nID03 - C");
        let headers: Vec<_> = blocks.iter().filter_map(|b| b.header()).collect();
        assert_eq!(headers, ["ATMI", "BRINKS", "jalin"]);
        assert_eq!(blocks[1].text(), "BRINKS\nID02 - B");
    }

    #[test]
    fn test_leading_lines_are_dropped() {
        let blocks = segment_outage("Selamat pagi\nInfo padam\nARTAJASA\nID04 - D");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "ARTAJASA\nID04 - D");
    }

    #[test]
    fn test_no_header_no_blocks() {
        assert!(segment_outage("ID01 - Mall\nProblem: listrik mati").is_empty());
        assert!(segment_outage("").is_empty());
    }

    #[test]
    fn test_maintenance_headers() {
        let raw = "Preventive Maintenance ATMi\nID ATM: 1\nOpen Tiket Brinks\nID ATM: 2\nopen ticket jalin\nID ATM: 3\nARTAJASA\nID ATM: 4";
        let blocks = segment_maintenance(raw);
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[2].header(), Some("open ticket jalin"));
    }

    #[test]
    fn test_activity_line_is_not_an_outage_header() {
        let blocks = segment_outage("Preventive Maintenance ATMi\nID ATM: 1");
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_preview_truncates() {
        let block = TextBlock::from_text("ATMI\nID01 - Mall Besar Sekali");
        assert_eq!(block.preview(10), "ATMI | ID0...");
        assert_eq!(block.preview(100), "ATMI | ID01 - Mall Besar Sekali");
    }

    proptest! {
        #[test]
        fn prop_headerless_text_yields_no_blocks(lines in proptest::collection::vec("[a-z0-9 :.-]{0,30}", 0..20)) {
            // Lowercase-only words can still spell a group name; skip those.
            prop_assume!(!lines.iter().any(|l| is_bare_group_line(l.trim())));
            let raw = lines.join("\n");
            prop_assert!(segment_outage(&raw).is_empty());
        }

        #[test]
        fn prop_one_header_one_block(body in proptest::collection::vec("[0-9 :.-]{1,30}", 0..20)) {
            let raw = format!("BRINKS\n{}", body.join("\n"));
            prop_assert_eq!(segment_outage(&raw).len(), 1);
        }
    }
}
