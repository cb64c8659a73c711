//! Input message and extracted record models.
//!
//! Every text field defaults to the empty string: the destination sheets have
//! a fixed column per field, so "not found" is a blank cell, never a gap.

use serde::{Deserialize, Serialize};

use crate::normalize::customer::CustomerGroup;
use crate::normalize::vocabulary::{ActionType, Kegiatan, ModemType};

/// A chat message as delivered by the messaging transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    pub text: String,
    #[serde(default)]
    pub timestamp_epoch_seconds: Option<i64>,
    #[serde(default)]
    pub origin_id: String,
}

impl RawMessage {
    pub fn new(text: &str, timestamp_epoch_seconds: Option<i64>, origin_id: &str) -> Self {
        Self {
            text: text.to_string(),
            timestamp_epoch_seconds,
            origin_id: origin_id.to_string(),
        }
    }
}

/// One power or connectivity outage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutageRecord {
    /// `None` means the block could not be attributed and must be dropped.
    pub customer: Option<CustomerGroup>,
    pub id_atm: String,
    pub location: String,
    pub area: String,
    pub downtime_date: String,
    pub downtime_time: String,
    pub uptime_date: String,
    pub uptime_time: String,
    pub duration: String,
    pub confirmed_by: String,
    pub remarks: String,
}

/// One maintenance visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceRecord {
    /// `None` means the block could not be attributed and must be dropped.
    pub customer: Option<CustomerGroup>,
    pub visit_date: String,
    pub id_atm: String,
    pub location: String,
    pub area: String,
    pub visit_start: String,
    pub visit_end: String,
    pub serial_number: String,
    pub problems: Vec<String>,
    pub actions: Vec<String>,
    pub activity: Option<Kegiatan>,
    pub action_type: ActionType,
    pub new_modem_type: Option<ModemType>,
    pub status: String,
    pub notes: String,
    pub pic_mt: String,
    pub pic_store: String,
    pub pic_flm: String,
}

impl Default for MaintenanceRecord {
    fn default() -> Self {
        Self {
            customer: None,
            visit_date: String::new(),
            id_atm: String::new(),
            location: String::new(),
            area: String::new(),
            visit_start: String::new(),
            visit_end: String::new(),
            serial_number: String::new(),
            problems: Vec::new(),
            actions: Vec::new(),
            activity: None,
            action_type: ActionType::Other,
            new_modem_type: None,
            status: String::new(),
            notes: String::new(),
            pic_mt: String::new(),
            pic_store: String::new(),
            pic_flm: String::new(),
        }
    }
}

impl MaintenanceRecord {
    /// Person in charge: maintenance team, then field liaison, then store.
    pub fn person_in_charge(&self) -> &str {
        [&self.pic_mt, &self.pic_flm, &self.pic_store]
            .into_iter()
            .find(|p| !p.is_empty())
            .map(|p| p.as_str())
            .unwrap_or("")
    }
}
