//! Maintenance visit extraction.
//!
//! A maintenance block looks like:
//!
//! ```text
//! Preventive Maintenance ATMi
//! Tanggal Kunjungan: 14 Oktober 2025
//! ID ATM: 12345
//! Lokasi: Indomaret Raya
//! Waktu Kunjungan: 10.00 WIB
//! Problem:
//! * Modem sering restart
//! Action: Ganti SIM card, Cleaning modem
//! Status: ATM Online, UP dual link (menggunakan UPS)
//! Selesai: 11.30 WIB
//! PIC MT: Andi
//! ```
//!
//! Lines are matched once each, top to bottom. `Problem:` and `Action:` open
//! a list section that absorbs the bullet lines after it; the first
//! non-bullet line closes it.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ExtractError;
use crate::extraction::lines::{after_first_colon, is_bullet, starts_with_ignore_case, strip_bullet};
use crate::logging::structured::LogContext;
use crate::normalize::customer::detect_maintenance_customer;
use crate::normalize::notes::{
    append_note, ex_location_note, is_power_line, normalize_status, power_note, status_ups_note,
};
use crate::normalize::vocabulary::{ActionType, Kegiatan, ModemType};
use crate::segmentation::TextBlock;
use crate::storage::models::MaintenanceRecord;

/// Open list section while walking a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    None,
    Problem,
    Action,
}

impl Section {
    /// Section opened by a header line, if the line is one.
    pub fn opened_by(line: &str) -> Option<Section> {
        if PROBLEM_HEADER.is_match(line) {
            Some(Section::Problem)
        } else if ACTION_HEADER.is_match(line) {
            Some(Section::Action)
        } else {
            None
        }
    }

    /// State after a non-header line: bullets keep the section open,
    /// anything else closes it.
    pub fn after(self, line: &str) -> Section {
        if is_bullet(line) {
            self
        } else {
            Section::None
        }
    }
}

/// Field a labeled line is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceField {
    VisitDate,
    IdAtm,
    OldLocation,
    Location,
    Area,
    VisitStart,
    SerialNumber,
    Activity,
    ModemType,
    Status,
    VisitEnd,
    PicMt,
    PicStore,
    PicFlm,
    PowerNote,
    ModemLine,
}

/// How a field rule recognizes its line.
pub enum LinePredicate {
    Contains(&'static str),
    Prefix(&'static str),
    PrefixIgnoreCase(&'static str),
    Pattern(Regex),
    Check(fn(&str) -> bool),
}

impl LinePredicate {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            LinePredicate::Contains(needle) => line.contains(needle),
            LinePredicate::Prefix(prefix) => line.starts_with(prefix),
            LinePredicate::PrefixIgnoreCase(prefix) => starts_with_ignore_case(line, prefix),
            LinePredicate::Pattern(re) => re.is_match(line),
            LinePredicate::Check(f) => f(line),
        }
    }
}

lazy_static! {
    static ref PROBLEM_HEADER: Regex = Regex::new(r"^Problem\s*:").unwrap();
    static ref ACTION_HEADER: Regex = Regex::new(r"^Action\s*:").unwrap();
    static ref ACTION_SPLIT: Regex = Regex::new(r"(?i),|\s+dan\s+|\s+&\s+").unwrap();
    static ref OPEN_TICKET_MARK: Regex = Regex::new(r"(?i)open\s*ti(?:c)?ket|\(OT\)").unwrap();

    /// Field rules, first match wins. "Lokasi Lama" precedes the plain
    /// "Lokasi" prefix so an old location never overwrites the current one.
    static ref FIELD_RULES: Vec<(MaintenanceField, LinePredicate)> = vec![
        (MaintenanceField::VisitDate, LinePredicate::Contains("Tanggal Kunjungan")),
        (MaintenanceField::VisitDate, LinePredicate::Pattern(Regex::new(r"(?i)^Tgl\s*Kunjungan").unwrap())),
        (MaintenanceField::IdAtm, LinePredicate::Prefix("ID ATM")),
        (MaintenanceField::OldLocation, LinePredicate::Pattern(Regex::new(r"(?i)^Lokasi\s+Lama").unwrap())),
        (MaintenanceField::Location, LinePredicate::PrefixIgnoreCase("LOKASI")),
        (MaintenanceField::Location, LinePredicate::Pattern(Regex::new(r"(?i)^Relokasi\s*ke").unwrap())),
        (MaintenanceField::Area, LinePredicate::PrefixIgnoreCase("AREA")),
        (MaintenanceField::VisitStart, LinePredicate::Prefix("Waktu Kunjungan")),
        (MaintenanceField::SerialNumber, LinePredicate::PrefixIgnoreCase("SERIAL NUMBER")),
        (MaintenanceField::Activity, LinePredicate::PrefixIgnoreCase("KEGIATAN")),
        (MaintenanceField::ModemType, LinePredicate::PrefixIgnoreCase("TYPE MODEM")),
        (MaintenanceField::Status, LinePredicate::Prefix("Status")),
        (MaintenanceField::VisitEnd, LinePredicate::Prefix("Selesai")),
        (MaintenanceField::PicMt, LinePredicate::Prefix("PIC MT")),
        (MaintenanceField::PicStore, LinePredicate::Prefix("PIC Toko")),
        (MaintenanceField::PicFlm, LinePredicate::Prefix("PIC FLM")),
        (MaintenanceField::PowerNote, LinePredicate::Check(is_power_line)),
        (MaintenanceField::ModemLine, LinePredicate::Pattern(Regex::new(r"(?i)RBM33|RB951").unwrap())),
    ];
}

/// Route a line to the first field rule it matches.
pub fn match_maintenance_line(line: &str) -> Option<MaintenanceField> {
    FIELD_RULES
        .iter()
        .find(|(_, predicate)| predicate.matches(line))
        .map(|(field, _)| *field)
}

/// Split the inline part of an `Action:` header into separate items.
pub fn split_inline_actions(inline: &str) -> Vec<String> {
    ACTION_SPLIT
        .split(inline)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn apply_field(record: &mut MaintenanceRecord, field: MaintenanceField, line: &str) {
    let value = after_first_colon(line);
    match field {
        MaintenanceField::VisitDate => record.visit_date = value.to_string(),
        MaintenanceField::IdAtm => record.id_atm = value.to_string(),
        MaintenanceField::OldLocation => {
            if !value.is_empty() {
                append_note(&mut record.notes, &ex_location_note(value));
            }
        }
        MaintenanceField::Location => record.location = value.to_string(),
        MaintenanceField::Area => record.area = value.to_string(),
        MaintenanceField::VisitStart => record.visit_start = value.to_string(),
        MaintenanceField::SerialNumber => record.serial_number = value.to_string(),
        // A blank label leaves the field to post-pass inference.
        MaintenanceField::Activity if !value.is_empty() => {
            record.activity = Some(Kegiatan::normalize(value))
        }
        MaintenanceField::ModemType if !value.is_empty() => {
            record.new_modem_type = Some(ModemType::normalize(value))
        }
        MaintenanceField::Activity | MaintenanceField::ModemType => {}
        MaintenanceField::Status => {
            record.status = normalize_status(value);
            if let Some(note) = status_ups_note(value) {
                append_note(&mut record.notes, &note);
            }
        }
        MaintenanceField::VisitEnd => record.visit_end = value.to_string(),
        MaintenanceField::PicMt => record.pic_mt = value.to_string(),
        MaintenanceField::PicStore => record.pic_store = value.to_string(),
        MaintenanceField::PicFlm => record.pic_flm = value.to_string(),
        MaintenanceField::PowerNote => append_note(&mut record.notes, &power_note(line)),
        MaintenanceField::ModemLine => record.new_modem_type = Some(ModemType::normalize(line)),
    }
}

/// Extract one maintenance record from a block.
pub fn extract_maintenance(
    block: &TextBlock,
    ctx: &LogContext,
) -> Result<MaintenanceRecord, ExtractError> {
    if block.is_empty() {
        return Err(ExtractError::EmptyBlock);
    }

    let text = block.text();
    let mut record = MaintenanceRecord {
        customer: detect_maintenance_customer(&text),
        ..Default::default()
    };
    let mut section = Section::None;

    for line in block.lines() {
        if let Some(opened) = Section::opened_by(line) {
            let inline = after_first_colon(line);
            match opened {
                Section::Problem if !inline.is_empty() => record.problems.push(inline.to_string()),
                Section::Action => record.actions.extend(split_inline_actions(inline)),
                _ => {}
            }
            section = opened;
            continue;
        }

        if is_bullet(line) {
            match section {
                Section::Problem => {
                    record.problems.push(strip_bullet(line).to_string());
                    continue;
                }
                Section::Action => {
                    record.actions.push(strip_bullet(line).to_string());
                    continue;
                }
                Section::None => {}
            }
        }
        section = section.after(line);

        if OPEN_TICKET_MARK.is_match(line) {
            record.activity = Some(Kegiatan::OpenTicket);
        }

        if let Some(field) = match_maintenance_line(line) {
            apply_field(&mut record, field, line);
            log::debug!("{} FIELD_EXTRACTED field={:?}", ctx, field);
        }
    }

    if record.activity.is_none() {
        record.activity = Kegiatan::infer_from_text(&block.lines().join(" "));
    }
    record.action_type = ActionType::from_actions(&record.actions);
    if record.new_modem_type.is_none() {
        record.new_modem_type = ModemType::infer_from_actions(&record.actions);
    }

    log::debug!(
        "{} MAINTENANCE_EXTRACTED customer={:?} id_atm={} problems={} actions={}",
        ctx,
        record.customer,
        record.id_atm,
        record.problems.len(),
        record.actions.len()
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::customer::CustomerGroup;
    use crate::normalize::notes::{DUAL_LINK_STATUS, UPS_IN_USE};

    fn extract(text: &str) -> MaintenanceRecord {
        let ctx = LogContext::new("test-msg");
        extract_maintenance(&TextBlock::from_text(text), &ctx).unwrap()
    }

    const FULL_VISIT: &str = "Preventive Maintenance ATMi
Tanggal Kunjungan: 14 Oktober 2025
ID ATM: 12345
Lokasi: Indomaret Raya
Area: Bekasi
Waktu Kunjungan: 10.00 WIB
Serial Number: SN-889
Problem:
* Modem sering restart
* Sinyal lemah
Action: Ganti SIM card, Cleaning modem
- Cek kabel LAN
Status: ATM Online, UP dual link (menggunakan UPS)
Selesai: 11.30 WIB
PIC MT: Andi
PIC Toko: Sari";

    #[test]
    fn test_full_visit() {
        let rec = extract(FULL_VISIT);
        assert_eq!(rec.customer, Some(CustomerGroup::Atmi));
        assert_eq!(rec.visit_date, "14 Oktober 2025");
        assert_eq!(rec.id_atm, "12345");
        assert_eq!(rec.location, "Indomaret Raya");
        assert_eq!(rec.area, "Bekasi");
        assert_eq!(rec.visit_start, "10.00 WIB");
        assert_eq!(rec.serial_number, "SN-889");
        assert_eq!(rec.problems, ["Modem sering restart", "Sinyal lemah"]);
        assert_eq!(rec.actions, ["Ganti SIM card", "Cleaning modem", "Cek kabel LAN"]);
        assert_eq!(rec.activity, Some(Kegiatan::PreventiveMaintenance));
        assert_eq!(rec.action_type, ActionType::ReplaceProviderSimcard);
        assert_eq!(rec.new_modem_type, None);
        assert_eq!(rec.status, DUAL_LINK_STATUS);
        assert_eq!(rec.notes, "kelistrikan ATM dan Modem : menggunakan UPS");
        assert_eq!(rec.visit_end, "11.30 WIB");
        assert_eq!(rec.pic_mt, "Andi");
        assert_eq!(rec.pic_store, "Sari");
    }

    #[test]
    fn test_section_closes_on_non_bullet() {
        let rec = extract("Open Tiket Brinks\nProblem: Offline\nID ATM: 9\n- bukan problem");
        assert_eq!(rec.problems, ["Offline"]);
        assert_eq!(rec.id_atm, "9");
        assert_eq!(rec.activity, Some(Kegiatan::OpenTicket));
    }

    #[test]
    fn test_inline_action_split() {
        assert_eq!(
            split_inline_actions("Restart modem dan cek kabel & ganti adaptor, "),
            ["Restart modem", "cek kabel", "ganti adaptor"]
        );
        assert!(split_inline_actions("").is_empty());
    }

    #[test]
    fn test_old_location_goes_to_notes() {
        let rec = extract("Open Ticket JALIN\nRelokasi ke: Mall Baru\nLokasi Lama: Ruko Lama");
        assert_eq!(rec.location, "Mall Baru");
        assert_eq!(rec.notes, "Lokasi Ex Ruko Lama");
    }

    #[test]
    fn test_abbreviated_visit_date() {
        let rec = extract("ARTAJASA\nTgl Kunjungan: 1 Mei 2025");
        assert_eq!(rec.visit_date, "1 Mei 2025");
    }

    #[test]
    fn test_power_lines_fold_into_notes() {
        let rec = extract(
            "Preventive Maintenance BRINKS\nKelistrikan ATM dan Modem : Menggunakan UPS\nJam Operasional: 24 jam (UPS)\nLokasi Lama: Gudang",
        );
        assert_eq!(rec.notes, format!("{}\nLokasi Ex Gudang", UPS_IN_USE));
    }

    #[test]
    fn test_modem_type_sources() {
        let explicit = extract("ATMI\nType Modem: rbm33 baru\nAction: Replace modem ke RB951");
        assert_eq!(explicit.new_modem_type, Some(ModemType::Rbm33));
        assert_eq!(explicit.action_type, ActionType::ReplaceModem);

        let free_line = extract("ATMI\nModem terpasang RB951");
        assert_eq!(free_line.new_modem_type, Some(ModemType::Rb951));

        let inferred = extract("ATMI\nAction:\n* Replace modem to RBM33");
        assert_eq!(inferred.new_modem_type, Some(ModemType::Rbm33));
    }

    #[test]
    fn test_labeled_activity() {
        let rec = extract("JALIN\nKegiatan: dismantle");
        assert_eq!(rec.activity, Some(Kegiatan::Dismantle));

        let unknown = extract("JALIN\nKegiatan: survey");
        assert_eq!(unknown.activity, Some(Kegiatan::Other("SURVEY".into())));
    }

    #[test]
    fn test_activity_inference_fallback() {
        let rec = extract("BRINKS\nreaktivasi mesin\nID ATM: 5");
        assert_eq!(rec.activity, Some(Kegiatan::Reaktivasi));

        let none = extract("BRINKS\nID ATM: 5");
        assert_eq!(none.activity, None);
        assert_eq!(none.action_type, ActionType::Other);
    }

    #[test]
    fn test_blank_labels_fall_back_to_inference() {
        let rec = extract(
            "Preventive Maintenance ATMi\nKegiatan:\nType Modem:\nAction: Replace modem ke RBM33",
        );
        assert_eq!(rec.activity, Some(Kegiatan::PreventiveMaintenance));
        assert_eq!(rec.new_modem_type, Some(ModemType::Rbm33));
        assert_eq!(rec.action_type, ActionType::ReplaceModem);
    }

    #[test]
    fn test_status_verbatim() {
        let rec = extract("ATMI\nStatus: ATM Online single link");
        assert_eq!(rec.status, "ATM Online single link");
        assert!(rec.notes.is_empty());
    }

    #[test]
    fn test_bullet_without_section_goes_to_rules() {
        let rec = extract("ATMI\n- RBM33 terpasang");
        assert_eq!(rec.new_modem_type, Some(ModemType::Rbm33));
        assert!(rec.actions.is_empty());
    }

    #[test]
    fn test_unattributed_block() {
        let rec = extract("Preventive Maintenance\nID ATM: 1");
        assert_eq!(rec.customer, None);
    }

    #[test]
    fn test_line_matching_table() {
        assert_eq!(match_maintenance_line("Lokasi Lama: X"), Some(MaintenanceField::OldLocation));
        assert_eq!(match_maintenance_line("LOKASI: X"), Some(MaintenanceField::Location));
        assert_eq!(match_maintenance_line("PIC FLM: Y"), Some(MaintenanceField::PicFlm));
        assert_eq!(match_maintenance_line("Catatan bebas"), None);
    }
}
