//! Closed vocabularies for categorical maintenance fields.
//!
//! Each normalizer is a pure function from free text to a tagged value; the
//! `Other` variants carry text that matched nothing so no input is lost.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};

/// Maintenance activity type (kegiatan).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kegiatan {
    PreventiveMaintenance,
    OpenTicket,
    Dismantle,
    Relokasi,
    Reaktivasi,
    Other(String),
}

impl Kegiatan {
    pub fn label(&self) -> &str {
        match self {
            Kegiatan::PreventiveMaintenance => "PREVENTIVE MAINTENANCE (PM)",
            Kegiatan::OpenTicket => "OPEN TICKET (OT)",
            Kegiatan::Dismantle => "DISMANTLE",
            Kegiatan::Relokasi => "RELOKASI",
            Kegiatan::Reaktivasi => "REAKTIVASI",
            Kegiatan::Other(raw) => raw,
        }
    }

    /// Normalize a labeled `Kegiatan:` value. Unknown text is kept uppercased.
    pub fn normalize(raw: &str) -> Self {
        let s = raw.trim().to_uppercase();
        if s.contains("PREVENTIVE") {
            Kegiatan::PreventiveMaintenance
        } else if s.contains("OPEN TICKET") || s.contains("OPEN TIKET") || s.contains("(OT)") || s == "OT" {
            Kegiatan::OpenTicket
        } else if s.contains("DISMANTLE") {
            Kegiatan::Dismantle
        } else if s.contains("RELOKASI") || s.contains("RELOCATION") {
            Kegiatan::Relokasi
        } else if s.contains("REAKTIVASI") || s.contains("REACTIVATION") {
            Kegiatan::Reaktivasi
        } else {
            Kegiatan::Other(s)
        }
    }

    /// Infer the activity from a whole block when no line stated it.
    ///
    /// Unlike [`Kegiatan::normalize`] this never yields `Other`: a block with
    /// none of the markers has no activity.
    pub fn infer_from_text(text: &str) -> Option<Self> {
        let upper = text.to_uppercase();
        if upper.contains("PREVENTIVE") {
            Some(Kegiatan::PreventiveMaintenance)
        } else if upper.contains("OPEN TICKET")
            || upper.contains("OPEN TIKET")
            || upper.contains("(OT)")
            || OT_WORD.is_match(&upper)
        {
            Some(Kegiatan::OpenTicket)
        } else if upper.contains("DISMANTLE") {
            Some(Kegiatan::Dismantle)
        } else if upper.contains("RELOKASI") {
            Some(Kegiatan::Relokasi)
        } else if upper.contains("REAKTIVASI") {
            Some(Kegiatan::Reaktivasi)
        } else {
            None
        }
    }
}

/// Kind of corrective action performed, judged over the whole action list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    ReplaceModem,
    ReplaceProviderSimcard,
    Other,
}

impl ActionType {
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::ReplaceModem => "REPLACE MODEM",
            ActionType::ReplaceProviderSimcard => "REPLACE PROVIDER/SIMCARD",
            ActionType::Other => "OTHER",
        }
    }

    /// A SIM/provider replacement still counts when other, routine actions
    /// sit in the same list: a site can carry two SIM cards, one replaced
    /// and one only serviced.
    pub fn from_actions(actions: &[String]) -> Self {
        let joined = actions.join(" ").to_uppercase();
        if REPLACE_MODEM.is_match(&joined) {
            ActionType::ReplaceModem
        } else if REPLACE_PROVIDER.is_match(&joined) {
            ActionType::ReplaceProviderSimcard
        } else {
            ActionType::Other
        }
    }
}

/// Modem model installed during the visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModemType {
    Rbm33,
    Rb951,
    Other(String),
}

impl ModemType {
    pub fn label(&self) -> &str {
        match self {
            ModemType::Rbm33 => "RBM33",
            ModemType::Rb951 => "RB951",
            ModemType::Other(raw) => raw,
        }
    }

    /// Normalize a `Type Modem:` value or a free line naming a model.
    /// Unknown text is kept verbatim.
    pub fn normalize(raw: &str) -> Self {
        let s = raw.to_uppercase();
        if s.contains("RBM33") {
            ModemType::Rbm33
        } else if s.contains("RB951") {
            ModemType::Rb951
        } else {
            ModemType::Other(raw.trim().to_string())
        }
    }

    /// Infer the new modem model from action items. RBM33 is checked before
    /// RB951, and an explicit model name before a "replace ... to/ke" phrase.
    pub fn infer_from_actions(actions: &[String]) -> Option<Self> {
        if actions.is_empty() {
            return None;
        }
        let joined = actions.join(" ").to_uppercase();
        if RBM33_NAME.is_match(&joined) || REPLACE_TO_RBM.is_match(&joined) {
            Some(ModemType::Rbm33)
        } else if RB951_NAME.is_match(&joined) {
            Some(ModemType::Rb951)
        } else {
            None
        }
    }
}

lazy_static! {
    static ref OT_WORD: Regex = Regex::new(r"\bOT\b").unwrap();
    static ref REPLACE_MODEM: Regex = Regex::new(r"(REPLACE|GANTI)\s*MODEM").unwrap();
    static ref REPLACE_PROVIDER: Regex = Regex::new(r"(REPLACE|GANTI).*(PROVIDER|SIM)").unwrap();
    static ref RBM33_NAME: Regex = Regex::new(r"RBM\s*33").unwrap();
    static ref REPLACE_TO_RBM: Regex =
        Regex::new(r"(REPLACE|GANTI).*MODEM.*(KE|TO)\s*RBM|(REPLACE|GANTI).*RBM").unwrap();
    static ref RB951_NAME: Regex = Regex::new(r"RB\s*951").unwrap();
}

macro_rules! serialize_as_label {
    ($($ty:ty),*) => {
        $(impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        })*
    };
}

serialize_as_label!(Kegiatan, ActionType, ModemType);
