//! Outage report extraction.
//!
//! An outage block looks like:
//!
//! ```text
//! ATMI
//! ID01 - Mall Besar
//! Area: Jaksel
//! Problem: Listrik mati
//! Pukul: 14:00
//! Info: Pak Budi (security)
//! ```
//!
//! Each line feeds at most one field and the first line for a field wins.
//! Uptime and duration are never reported in these messages and stay blank.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ExtractError;
use crate::extraction::lines::after_first_colon;
use crate::logging::structured::LogContext;
use crate::normalize::customer::{detect_outage_customer, BARE_GROUP_LINE};
use crate::segmentation::TextBlock;
use crate::storage::models::OutageRecord;

pub const INDONESIAN_MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Field a line is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutageField {
    Header,
    Area,
    Remarks,
    DowntimeTime,
    ConfirmedBy,
    IdLocation,
}

lazy_static! {
    /// Line rules, first match wins.
    static ref OUTAGE_RULES: Vec<(OutageField, Regex)> = vec![
        (OutageField::Header, BARE_GROUP_LINE.clone()),
        (OutageField::Area, Regex::new(r"(?i)^Area\s*:").unwrap()),
        (OutageField::Remarks, Regex::new(r"(?i)^Problem\s*:").unwrap()),
        (OutageField::DowntimeTime, Regex::new(r"(?i)^Pukul").unwrap()),
        (OutageField::ConfirmedBy, Regex::new(r"(?i)^Info\s*:").unwrap()),
        (OutageField::IdLocation, Regex::new(r"-").unwrap()),
    ];

    static ref ID_LOCATION: Regex = Regex::new(r"^([A-Za-z0-9\-]+)\s*-\s*(.+)$").unwrap();
    static ref DASH_SPLIT: Regex = Regex::new(r"\s*-\s*").unwrap();
    static ref PUKUL_LABEL: Regex = Regex::new(r"(?i)^Pukul\s*:?\s*").unwrap();
    static ref CLOCK_TIME: Regex = Regex::new(r"\b(\d{1,2}:\d{2}(?::\d{2})?)\b").unwrap();
    static ref DATE_IN_TEXT: Regex = Regex::new(r"\b(\d{1,2}\s+[A-Za-z]+\s+\d{4})\b").unwrap();
}

/// Route a trimmed line to the first field rule it matches.
pub fn match_outage_line(line: &str) -> Option<OutageField> {
    OUTAGE_RULES
        .iter()
        .find(|(_, pattern)| pattern.is_match(line))
        .map(|(field, _)| *field)
}

/// "16 Oktober 2026".
pub fn format_indonesian_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        INDONESIAN_MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Split "ID01 - Mall Besar" into id and location.
pub fn split_id_location(line: &str) -> (String, String) {
    if let Some(caps) = ID_LOCATION.captures(line) {
        return (caps[1].trim().to_string(), caps[2].trim().to_string());
    }
    if let Some((left, right)) = line.split_once(" - ") {
        return (left.trim().to_string(), right.trim().to_string());
    }
    let mut parts = DASH_SPLIT.splitn(line, 2);
    let id = parts.next().unwrap_or("").trim().to_string();
    let location = parts.next().unwrap_or("").trim().to_string();
    (id, location)
}

/// First clock time after the "Pukul" label, else the raw label value.
pub fn parse_downtime_time(line: &str) -> String {
    let rest = PUKUL_LABEL.replace(line, "");
    match CLOCK_TIME.captures(&rest) {
        Some(caps) => caps[1].to_string(),
        None => rest.trim().to_string(),
    }
}

fn set_once(slot: &mut String, value: &str) {
    if slot.is_empty() {
        *slot = value.to_string();
    }
}

/// Extract one outage record from a block.
///
/// `today` is used for the downtime date when the block names no date.
/// Chat-forward prefixes are expected to be stripped by the caller.
pub fn extract_outage(
    block: &TextBlock,
    today: NaiveDate,
    ctx: &LogContext,
) -> Result<OutageRecord, ExtractError> {
    if block.is_empty() {
        return Err(ExtractError::EmptyBlock);
    }

    let text = block.text();
    let mut record = OutageRecord {
        customer: detect_outage_customer(&text),
        ..Default::default()
    };

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let Some(field) = match_outage_line(line) else {
            continue;
        };
        match field {
            OutageField::Header => {}
            OutageField::Area => set_once(&mut record.area, after_first_colon(line)),
            OutageField::Remarks => set_once(&mut record.remarks, after_first_colon(line)),
            OutageField::DowntimeTime => {
                set_once(&mut record.downtime_time, &parse_downtime_time(line))
            }
            OutageField::ConfirmedBy => {
                set_once(&mut record.confirmed_by, after_first_colon(line))
            }
            OutageField::IdLocation => {
                if record.id_atm.is_empty() && record.location.is_empty() {
                    let (id, location) = split_id_location(line);
                    record.id_atm = id;
                    record.location = location;
                }
            }
        }
        log::debug!("{} FIELD_EXTRACTED field={:?}", ctx, field);
    }

    record.downtime_date = match DATE_IN_TEXT.captures(&text) {
        Some(caps) => caps[1].to_string(),
        None => format_indonesian_date(today),
    };

    log::debug!(
        "{} OUTAGE_EXTRACTED customer={:?} id_atm={}",
        ctx,
        record.customer,
        record.id_atm
    );

    Ok(record)
}
