//! Customer group (kelolaan) detection.
//!
//! Four network operators manage the ATMs. Outage reports name them on a
//! bare header line; maintenance reports usually name them inside a
//! "Preventive Maintenance <group>" or "Open Tiket <group>" header.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Lines considered when a maintenance block has no activity header.
pub const FALLBACK_SCAN_LINES: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerGroup {
    #[serde(rename = "ATMi")]
    Atmi,
    #[serde(rename = "ARTAJASA")]
    Artajasa,
    #[serde(rename = "BRINKS")]
    Brinks,
    #[serde(rename = "JALIN")]
    Jalin,
}

impl CustomerGroup {
    /// Label written to the customer column.
    pub fn label(&self) -> &'static str {
        match self {
            CustomerGroup::Atmi => "ATMi",
            CustomerGroup::Artajasa => "ARTAJASA",
            CustomerGroup::Brinks => "BRINKS",
            CustomerGroup::Jalin => "JALIN",
        }
    }
}

impl fmt::Display for CustomerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

lazy_static! {
    /// A whole line that is nothing but a group name.
    pub static ref BARE_GROUP_LINE: Regex =
        Regex::new(r"(?i)^(ATMI|ARTAJASA|BRINKS|JALIN)\s*$").unwrap();

    static ref CIT_LINE: Regex = Regex::new(r"(?i)^\s*CIT\s*:").unwrap();
    static ref ACTIVITY_HEADER: Regex =
        Regex::new(r"(?i)preventive\s+maintenance|open\s*ti(?:c)?ket").unwrap();

    /// Maintenance priority: ATMi, BRINKS, ARTAJASA (or AJ), JALIN.
    static ref MAINTENANCE_GROUPS: Vec<(CustomerGroup, Regex)> = vec![
        (CustomerGroup::Atmi, Regex::new(r"(?i)\bATM[-\s]?I\b").unwrap()),
        (CustomerGroup::Brinks, Regex::new(r"(?i)\bBRINKS\b").unwrap()),
        (CustomerGroup::Artajasa, Regex::new(r"(?i)\bARTAJASA\b|\bAJ\b").unwrap()),
        (CustomerGroup::Jalin, Regex::new(r"(?i)\bJALIN\b").unwrap()),
    ];

    /// Outage priority: ATMi, ARTAJASA, BRINKS, JALIN.
    static ref OUTAGE_GROUPS: Vec<(CustomerGroup, Regex)> = vec![
        (CustomerGroup::Atmi, Regex::new(r"(?i)\bATMI\b").unwrap()),
        (CustomerGroup::Artajasa, Regex::new(r"(?i)\bARTAJASA\b").unwrap()),
        (CustomerGroup::Brinks, Regex::new(r"(?i)\bBRINKS\b").unwrap()),
        (CustomerGroup::Jalin, Regex::new(r"(?i)\bJALIN\b").unwrap()),
    ];
}

fn first_group(rules: &[(CustomerGroup, Regex)], text: &str) -> Option<CustomerGroup> {
    rules
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(group, _)| *group)
}

/// Check if a trimmed line is a bare group-name header.
pub fn is_bare_group_line(line: &str) -> bool {
    BARE_GROUP_LINE.is_match(line)
}

/// Detect the group of an outage block by scanning its whole text.
pub fn detect_outage_customer(text: &str) -> Option<CustomerGroup> {
    first_group(&OUTAGE_GROUPS, text)
}

/// Detect the group of a maintenance block.
///
/// `CIT:` lines are ignored first: they name the cash-in-transit company,
/// which may share a name with a group. An activity header line is
/// authoritative when it names a group; otherwise the first
/// [`FALLBACK_SCAN_LINES`] lines are scanned together.
pub fn detect_maintenance_customer(text: &str) -> Option<CustomerGroup> {
    let lines: Vec<&str> = text.lines().filter(|l| !CIT_LINE.is_match(l)).collect();

    if let Some(header) = lines.iter().find(|l| ACTIVITY_HEADER.is_match(l)) {
        if let Some(group) = first_group(&MAINTENANCE_GROUPS, header) {
            return Some(group);
        }
    }

    let first_chunk = lines
        .iter()
        .take(FALLBACK_SCAN_LINES)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    first_group(&MAINTENANCE_GROUPS, &first_chunk)
}
