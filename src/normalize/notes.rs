//! Notes (keterangan) composition.
//!
//! Several unrelated lines end up in the notes column: power-supply remarks,
//! UPS parentheticals from the status line, and the previous location of a
//! relocated ATM. Entries are joined with newlines in order of appearance.

use lazy_static::lazy_static;
use regex::Regex;

use crate::extraction::lines::after_first_colon;

pub const UPS_IN_USE: &str = "ATM dan Modem menggunakan UPS";
pub const UPS_NOT_IN_USE: &str = "ATM dan Modem tidak menggunakan UPS";
pub const STATUS_UPS_PREFIX: &str = "kelistrikan ATM dan Modem : ";
pub const DUAL_LINK_STATUS: &str = "ATM Online, UP dual link";

lazy_static! {
    static ref POWER_MARKER: Regex = Regex::new(r"(?i)UPS|Kelistrikan").unwrap();
    static ref OPERATING_HOURS: Regex = Regex::new(r"(?i)Jam\s*Operasional").unwrap();
    static ref KELISTRIKAN_FIELD: Regex = Regex::new(r"(?i)Kelistrikan\s*ATM\s*dan\s*Modem").unwrap();
    static ref USES_UPS: Regex = Regex::new(r"(?i)menggunakan\s*ups").unwrap();
    static ref NOT_USES_UPS: Regex = Regex::new(r"(?i)tidak\s*menggunakan\s*ups").unwrap();
    static ref BARE_UPS: Regex = Regex::new(r"(?i)^ups$").unwrap();
    static ref NEGATED_UPS: Regex = Regex::new(r"(?i)tidak.*ups|no.*ups").unwrap();
    static ref STATUS_UPS_PAREN: Regex = Regex::new(r"(?i)\(([^)]*ups[^)]*)\)").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Append one entry to a notes field.
pub fn append_note(notes: &mut String, entry: &str) {
    let entry = entry.trim();
    if entry.is_empty() {
        return;
    }
    if !notes.is_empty() {
        notes.push('\n');
    }
    notes.push_str(entry);
}

/// Check if a line is a free power-supply remark (and not operating hours).
pub fn is_power_line(line: &str) -> bool {
    POWER_MARKER.is_match(line) && !OPERATING_HOURS.is_match(line)
}

/// Canonical phrasing for a "Kelistrikan ATM dan Modem" value.
pub fn normalize_ups_phrase(value: &str) -> String {
    let value = value.trim();
    if USES_UPS.is_match(value) {
        if NOT_USES_UPS.is_match(value) {
            UPS_NOT_IN_USE.to_string()
        } else {
            UPS_IN_USE.to_string()
        }
    } else if BARE_UPS.is_match(value) {
        UPS_IN_USE.to_string()
    } else if NEGATED_UPS.is_match(value) {
        UPS_NOT_IN_USE.to_string()
    } else {
        value.to_string()
    }
}

/// Notes entry for a power-supply line.
pub fn power_note(line: &str) -> String {
    let value = after_first_colon(line);
    if KELISTRIKAN_FIELD.is_match(line) && !value.is_empty() {
        return normalize_ups_phrase(value);
    }
    if value.is_empty() {
        line.trim().to_string()
    } else {
        value.to_string()
    }
}

/// Canonical status text. Online-with-dual-link collapses to one phrase.
pub fn normalize_status(raw: &str) -> String {
    let s = raw.to_lowercase();
    if s.contains("atm online") && s.contains("dual") {
        DUAL_LINK_STATUS.to_string()
    } else {
        raw.trim().to_string()
    }
}

/// Notes entry for a UPS parenthetical inside a status value, e.g.
/// "ATM Online (menggunakan UPS)".
pub fn status_ups_note(raw: &str) -> Option<String> {
    let caps = STATUS_UPS_PAREN.captures(raw)?;
    let inner = WHITESPACE_RUN.replace_all(caps.get(1)?.as_str(), " ");
    let inner = inner.trim();
    if inner.is_empty() {
        None
    } else {
        Some(format!("{}{}", STATUS_UPS_PREFIX, inner))
    }
}

/// Notes entry for the previous location of a relocated ATM.
pub fn ex_location_note(old_location: &str) -> String {
    format!("Lokasi Ex {}", old_location.trim())
}
