//! Row sinks.
//!
//! The engine hands rows to a [`RowSink`] one at a time. The production sink
//! is a remote spreadsheet; [`GridSink`] reproduces its placement rule in
//! memory: write into the first row of the scan window whose key column (B)
//! is blank, and never touch the numbering column (A).

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;

use crate::config::ScanWindow;
use crate::error::SinkError;
use crate::storage::rows::{update_range, Row};

/// Where a row ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppendOutcome {
    pub sheet: String,
    pub row_number: usize,
    pub updated_range: String,
}

/// Destination for assembled rows.
pub trait RowSink {
    fn append(&self, row: &Row, sheet: &str) -> Result<AppendOutcome, SinkError>;
}

/// In-memory sheets keyed by name. Row `n` of a sheet is `rows[n - 1]`.
#[derive(Debug, Default)]
pub struct GridSink {
    window: ScanWindow,
    sheets: RwLock<HashMap<String, Vec<Vec<String>>>>,
}

impl GridSink {
    pub fn new(window: ScanWindow) -> Self {
        Self {
            window,
            sheets: RwLock::new(HashMap::new()),
        }
    }

    /// Pre-fill a cell, e.g. a sheet's own numbering or an existing entry.
    pub fn set_cell(&self, sheet: &str, row_number: usize, column: usize, value: &str) {
        if row_number == 0 {
            return;
        }
        let mut sheets = self.sheets.write();
        let rows = sheets.entry(sheet.to_string()).or_default();
        let row = row_mut(rows, row_number);
        if row.len() <= column {
            row.resize(column + 1, String::new());
        }
        row[column] = value.to_string();
    }

    /// Cells of one sheet row (column A first), empty if never written.
    pub fn row(&self, sheet: &str, row_number: usize) -> Vec<String> {
        self.sheets
            .read()
            .get(sheet)
            .and_then(|rows| rows.get(row_number.checked_sub(1)?))
            .cloned()
            .unwrap_or_default()
    }

    /// First row in the window with a blank key cell.
    pub fn next_empty_row(&self, sheet: &str) -> Option<usize> {
        self.first_blank_row(self.sheets.read().get(sheet))
    }

    fn first_blank_row(&self, rows: Option<&Vec<Vec<String>>>) -> Option<usize> {
        (self.window.first_row.max(1)..=self.window.last_row).find(|&n| {
            rows.and_then(|r| r.get(n - 1))
                .and_then(|cells| cells.get(1))
                .map_or(true, |key| key.trim().is_empty())
        })
    }
}

fn row_mut(rows: &mut Vec<Vec<String>>, row_number: usize) -> &mut Vec<String> {
    if rows.len() < row_number {
        rows.resize(row_number, Vec::new());
    }
    &mut rows[row_number - 1]
}

impl RowSink for GridSink {
    fn append(&self, row: &Row, sheet: &str) -> Result<AppendOutcome, SinkError> {
        if row.key().trim().is_empty() {
            return Err(SinkError::Rejected("row has an empty key cell".into()));
        }

        // Scan and write under one lock so concurrent appends never share a row.
        let mut sheets = self.sheets.write();
        let rows = sheets.entry(sheet.to_string()).or_default();
        let row_number = self.first_blank_row(Some(&*rows)).ok_or_else(|| SinkError::WindowFull {
            sheet: sheet.to_string(),
            first_row: self.window.first_row,
            last_row: self.window.last_row,
        })?;

        let target = row_mut(rows, row_number);
        let numbering = target.first().cloned().unwrap_or_default();
        *target = std::iter::once(numbering)
            .chain(row.without_numbering().iter().cloned())
            .collect();

        Ok(AppendOutcome {
            sheet: sheet.to_string(),
            row_number,
            updated_range: update_range(sheet, row.kind, row_number),
        })
    }
}
