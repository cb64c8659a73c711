//! Maintenance vocabulary markers.
//!
//! Detects the activity and field-header words that only appear in
//! maintenance visit reports.

use lazy_static::lazy_static;
use regex::Regex;

/// A maintenance marker that can be found in raw message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceMarker {
    PreventiveMaintenance,
    OpenTicket,
    PmTag,
    OtTag,
    Dismantle,
    Relokasi,
    Reaktivasi,
    KegiatanField,
    WaktuKunjunganField,
    SerialNumberField,
    TypeModemField,
    ActionField,
}

impl MaintenanceMarker {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceMarker::PreventiveMaintenance => "preventive_maintenance",
            MaintenanceMarker::OpenTicket => "open_ticket",
            MaintenanceMarker::PmTag => "pm_tag",
            MaintenanceMarker::OtTag => "ot_tag",
            MaintenanceMarker::Dismantle => "dismantle",
            MaintenanceMarker::Relokasi => "relokasi",
            MaintenanceMarker::Reaktivasi => "reaktivasi",
            MaintenanceMarker::KegiatanField => "kegiatan_field",
            MaintenanceMarker::WaktuKunjunganField => "waktu_kunjungan_field",
            MaintenanceMarker::SerialNumberField => "serial_number_field",
            MaintenanceMarker::TypeModemField => "type_modem_field",
            MaintenanceMarker::ActionField => "action_field",
        }
    }
}

lazy_static! {
    /// Marker patterns, checked in order.
    static ref MARKER_PATTERNS: Vec<(MaintenanceMarker, Regex)> = vec![
        (MaintenanceMarker::PreventiveMaintenance, Regex::new(r"(?i)preventive\s*maintenance").unwrap()),
        (MaintenanceMarker::OpenTicket, Regex::new(r"(?i)open\s*ti(?:c)?ket").unwrap()),
        (MaintenanceMarker::PmTag, Regex::new(r"(?i)\(PM\)").unwrap()),
        (MaintenanceMarker::OtTag, Regex::new(r"(?i)\(OT\)").unwrap()),
        (MaintenanceMarker::Dismantle, Regex::new(r"(?i)dismantle").unwrap()),
        (MaintenanceMarker::Relokasi, Regex::new(r"(?i)relokasi").unwrap()),
        (MaintenanceMarker::Reaktivasi, Regex::new(r"(?i)reaktivasi").unwrap()),
        (MaintenanceMarker::KegiatanField, Regex::new(r"(?i)kegiatan\s*:").unwrap()),
        (MaintenanceMarker::WaktuKunjunganField, Regex::new(r"(?i)waktu\s*kunjungan").unwrap()),
        (MaintenanceMarker::SerialNumberField, Regex::new(r"(?i)serial\s*number").unwrap()),
        (MaintenanceMarker::TypeModemField, Regex::new(r"(?i)type\s*modem").unwrap()),
        (MaintenanceMarker::ActionField, Regex::new(r"(?i)action\s*:").unwrap()),
    ];
}

/// First maintenance marker present in `text`, if any.
pub fn find_maintenance_marker(text: &str) -> Option<MaintenanceMarker> {
    MARKER_PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(marker, _)| *marker)
}

/// Check if `text` carries any maintenance marker.
pub fn is_maintenance_text(text: &str) -> bool {
    find_maintenance_marker(text).is_some()
}
