//! Row assembly and sheet column layouts.
//!
//! A row always has one cell per sheet column, starting with the numbering
//! column (A). The numbering cell is always blank: sheets keep their own
//! numbers and the sink never writes column A.

use serde::Serialize;

use crate::normalize::duration::{strip_wib, visit_duration};
use crate::routing::ReportKind;
use crate::storage::models::{MaintenanceRecord, OutageRecord};

/// Outage sheet columns as (name, column letter).
pub const OUTAGE_COLUMNS: &[(&str, &str)] = &[
    ("no", "A"),
    ("customer", "B"),
    ("id_atm", "C"),
    ("location", "D"),
    ("area", "E"),
    ("downtime_date", "F"),
    ("downtime_time", "G"),
    ("uptime_date", "H"),
    ("uptime_time", "I"),
    ("duration", "J"),
    ("confirmed_by", "K"),
    ("remarks", "L"),
];

/// Maintenance sheet columns as (name, column letter).
pub const MAINTENANCE_COLUMNS: &[(&str, &str)] = &[
    ("no", "A"),
    ("customer", "B"),
    ("visit_date", "C"),
    ("activity", "D"),
    ("id_atm", "E"),
    ("serial_number", "F"),
    ("location", "G"),
    ("problems", "H"),
    ("visit_start", "I"),
    ("action_type", "J"),
    ("new_modem_type", "K"),
    ("actions", "L"),
    ("visit_end", "M"),
    ("duration", "N"),
    ("pic", "O"),
    ("status", "P"),
    ("notes", "Q"),
];

pub fn columns(kind: ReportKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        ReportKind::Outage => OUTAGE_COLUMNS,
        ReportKind::Maintenance => MAINTENANCE_COLUMNS,
    }
}

/// One sheet row, column A first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub kind: ReportKind,
    pub cells: Vec<String>,
}

impl Row {
    /// Cells from column B onward.
    pub fn without_numbering(&self) -> &[String] {
        self.cells.get(1..).unwrap_or(&[])
    }

    /// Key cell (column B, the customer) used to find empty sheet rows.
    pub fn key(&self) -> &str {
        self.cells.get(1).map(|s| s.as_str()).unwrap_or("")
    }
}

/// A1 range covering columns B..last of one sheet row, e.g. `Sheet1!B7:L7`.
pub fn update_range(sheet: &str, kind: ReportKind, row_number: usize) -> String {
    let last = columns(kind).last().map(|(_, letter)| *letter).unwrap_or("B");
    format!("{}!B{}:{}{}", sheet, row_number, last, row_number)
}

/// Render a problem/action list into one cell. Two or more items become
/// "- " prefixed lines; a single item is written bare.
pub fn render_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        _ => items
            .iter()
            .map(|item| format!("- {}", item))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn assemble_outage_row(record: &OutageRecord) -> Row {
    let cells = vec![
        String::new(),
        record.customer.map(|c| c.label().to_string()).unwrap_or_default(),
        record.id_atm.clone(),
        record.location.clone(),
        record.area.clone(),
        record.downtime_date.clone(),
        record.downtime_time.clone(),
        record.uptime_date.clone(),
        record.uptime_time.clone(),
        record.duration.clone(),
        record.confirmed_by.clone(),
        record.remarks.clone(),
    ];
    Row {
        kind: ReportKind::Outage,
        cells,
    }
}

pub fn assemble_maintenance_row(record: &MaintenanceRecord) -> Row {
    let start = strip_wib(&record.visit_start);
    let end = strip_wib(&record.visit_end);
    let duration = if start.is_empty() || end.is_empty() {
        String::new()
    } else {
        visit_duration(&start, &end)
    };

    let cells = vec![
        String::new(),
        record.customer.map(|c| c.label().to_string()).unwrap_or_default(),
        record.visit_date.clone(),
        record.activity.as_ref().map(|k| k.label().to_string()).unwrap_or_default(),
        record.id_atm.clone(),
        record.serial_number.clone(),
        record.location.clone(),
        render_list(&record.problems),
        start,
        record.action_type.label().to_string(),
        record.new_modem_type.as_ref().map(|m| m.label().to_string()).unwrap_or_default(),
        render_list(&record.actions),
        end,
        duration,
        record.person_in_charge().to_string(),
        record.status.clone(),
        record.notes.clone(),
    ];
    Row {
        kind: ReportKind::Maintenance,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::customer::CustomerGroup;
    use crate::normalize::vocabulary::{ActionType, Kegiatan, ModemType};

    fn column_index(kind: ReportKind, name: &str) -> usize {
        columns(kind).iter().position(|(n, _)| *n == name).unwrap()
    }

    fn cell<'a>(row: &'a Row, name: &str) -> &'a str {
        row.cells[column_index(row.kind, name)].as_str()
    }

    #[test]
    fn test_column_counts() {
        assert_eq!(OUTAGE_COLUMNS.len(), 12);
        assert_eq!(MAINTENANCE_COLUMNS.len(), 17);
    }

    #[test]
    fn test_outage_row_layout() {
        let record = OutageRecord {
            customer: Some(CustomerGroup::Brinks),
            id_atm: "B1".into(),
            remarks: "Listrik mati".into(),
            ..Default::default()
        };
        let row = assemble_outage_row(&record);
        assert_eq!(row.cells.len(), OUTAGE_COLUMNS.len());
        assert_eq!(row.cells[0], "");
        assert_eq!(row.key(), "BRINKS");
        assert_eq!(row.cells[column_index(ReportKind::Outage, "id_atm")], "B1");
        assert_eq!(row.cells[column_index(ReportKind::Outage, "remarks")], "Listrik mati");
        assert_eq!(row.cells[column_index(ReportKind::Outage, "uptime_time")], "");
        assert_eq!(row.without_numbering().len(), 11);
    }

    #[test]
    fn test_maintenance_row_layout() {
        let record = MaintenanceRecord {
            customer: Some(CustomerGroup::Atmi),
            visit_date: "14 Oktober 2025".into(),
            activity: Some(Kegiatan::OpenTicket),
            problems: vec!["Offline".into()],
            actions: vec!["Ganti SIM".into(), "Restart".into()],
            action_type: ActionType::ReplaceProviderSimcard,
            new_modem_type: Some(ModemType::Rb951),
            visit_start: "23.30 WIB".into(),
            visit_end: "00.45 WIB".into(),
            pic_store: "Sari".into(),
            pic_flm: "Joko".into(),
            ..Default::default()
        };
        let row = assemble_maintenance_row(&record);

        assert_eq!(row.cells.len(), MAINTENANCE_COLUMNS.len());
        assert_eq!(cell(&row, "no"), "");
        assert_eq!(cell(&row, "customer"), "ATMi");
        assert_eq!(cell(&row, "activity"), "OPEN TICKET (OT)");
        assert_eq!(cell(&row, "problems"), "Offline");
        assert_eq!(cell(&row, "actions"), "- Ganti SIM\n- Restart");
        assert_eq!(cell(&row, "visit_start"), "23.30");
        assert_eq!(cell(&row, "visit_end"), "00.45");
        assert_eq!(cell(&row, "duration"), "01:15:00");
        assert_eq!(cell(&row, "action_type"), "REPLACE PROVIDER/SIMCARD");
        assert_eq!(cell(&row, "new_modem_type"), "RB951");
        assert_eq!(cell(&row, "pic"), "Joko");
    }

    #[test]
    fn test_missing_values_keep_their_columns() {
        let row = assemble_maintenance_row(&MaintenanceRecord::default());
        assert_eq!(row.cells.len(), MAINTENANCE_COLUMNS.len());
        assert_eq!(row.cells[column_index(ReportKind::Maintenance, "duration")], "");
        assert_eq!(row.cells[column_index(ReportKind::Maintenance, "action_type")], "OTHER");
        assert_eq!(row.cells[column_index(ReportKind::Maintenance, "notes")], "");
    }

    #[test]
    fn test_render_list() {
        assert_eq!(render_list(&[]), "");
        assert_eq!(render_list(&["satu".to_string()]), "satu");
        assert_eq!(
            render_list(&["satu".to_string(), "dua".to_string()]),
            "- satu\n- dua"
        );
    }

    #[test]
    fn test_update_range() {
        assert_eq!(update_range("Oktober 2025", ReportKind::Outage, 7), "Oktober 2025!B7:L7");
        assert_eq!(update_range("Sheet1", ReportKind::Maintenance, 4), "Sheet1!B4:Q4");
    }
}
