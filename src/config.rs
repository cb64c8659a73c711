//! Sheet routing configuration.
//!
//! Read-only and injected: the pipeline receives a `&SheetConfig` and never
//! looks anything up globally. Loaded from JSON, e.g.
//!
//! ```json
//! {
//!   "outage": { "months": { "OCTOBER": "Oktober 2025" }, "default": "Sheet1" },
//!   "maintenance": { "months": { "OCTOBER": "Oktober 2025" }, "default": "Sheet1" },
//!   "utc_offset_hours": 7
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Datelike, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::routing::ReportKind;

/// English month keys, indexed by `month0()`.
pub const MONTH_KEYS: [&str; 12] = [
    "JANUARY",
    "FEBRUARY",
    "MARCH",
    "APRIL",
    "MAY",
    "JUNE",
    "JULY",
    "AUGUST",
    "SEPTEMBER",
    "OCTOBER",
    "NOVEMBER",
    "DECEMBER",
];

const DEFAULT_SHEET: &str = "Sheet1";
const WIB_OFFSET_HOURS: i32 = 7;

/// Month name -> sheet name, with a fallback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlySheets {
    #[serde(default)]
    pub months: HashMap<String, String>,
    #[serde(default = "default_sheet")]
    pub default: String,
}

impl Default for MonthlySheets {
    fn default() -> Self {
        Self {
            months: HashMap::new(),
            default: default_sheet(),
        }
    }
}

impl MonthlySheets {
    /// Sheet for an uppercase English month key; unknown or blank entries
    /// resolve to `default`.
    pub fn sheet_for_month(&self, month_key: &str) -> &str {
        self.months
            .get(&month_key.to_uppercase())
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(self.default.as_str())
    }
}

/// Rows of the sheet scanned for the first blank key cell (inclusive).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanWindow {
    pub first_row: usize,
    pub last_row: usize,
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self {
            first_row: 4,
            last_row: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SheetConfig {
    #[serde(default)]
    pub outage: MonthlySheets,
    #[serde(default)]
    pub maintenance: MonthlySheets,
    #[serde(default = "default_offset")]
    pub utc_offset_hours: i32,
    #[serde(default)]
    pub scan_window: ScanWindow,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            outage: MonthlySheets::default(),
            maintenance: MonthlySheets::default(),
            utc_offset_hours: WIB_OFFSET_HOURS,
            scan_window: ScanWindow::default(),
        }
    }
}

impl SheetConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let cfg: SheetConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.outage.default.trim().is_empty() || self.maintenance.default.trim().is_empty() {
            return Err(ConfigError::Invalid("default sheet name is empty".into()));
        }
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_hours {} outside -12..=14",
                self.utc_offset_hours
            )));
        }
        let w = self.scan_window;
        if w.first_row == 0 || w.first_row > w.last_row {
            return Err(ConfigError::Invalid(format!(
                "scan window {}..={} is empty or zero-based",
                w.first_row, w.last_row
            )));
        }
        Ok(())
    }

    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
    }

    /// Convert an instant to the configured local offset.
    pub fn localize(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        at.with_timezone(&self.offset())
    }

    /// Resolve the destination sheet for a report kind at a point in time.
    pub fn sheet_name(&self, kind: ReportKind, at: DateTime<Utc>) -> &str {
        let month_key = MONTH_KEYS[self.localize(at).month0() as usize];
        match kind {
            ReportKind::Outage => self.outage.sheet_for_month(month_key),
            ReportKind::Maintenance => self.maintenance.sheet_for_month(month_key),
        }
    }
}

fn default_sheet() -> String {
    DEFAULT_SHEET.to_string()
}

fn default_offset() -> i32 {
    WIB_OFFSET_HOURS
}
