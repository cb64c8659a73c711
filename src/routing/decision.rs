//! Pipeline selection.
//!
//! Decides which extraction pipeline a message goes through first.

use serde::{Deserialize, Serialize};

use crate::logging::structured::LogContext;
use crate::routing::markers::find_maintenance_marker;

/// Which report pipeline (and which sheet family) a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Maintenance,
    Outage,
}

impl ReportKind {
    pub fn as_str(&self) -> &str {
        match self {
            ReportKind::Maintenance => "maintenance",
            ReportKind::Outage => "outage",
        }
    }
}

/// Classify raw message text.
///
/// # Decision Tree
/// 1. Any maintenance marker present -> Maintenance
/// 2. Otherwise -> Outage
///
/// Maintenance wins ties; the caller still falls back to the outage pipeline
/// when maintenance extraction yields no usable record.
pub fn classify(text: &str, ctx: &LogContext) -> ReportKind {
    match find_maintenance_marker(text) {
        Some(marker) => {
            log::debug!(
                "{} CLASSIFY kind=maintenance marker={}",
                ctx,
                marker.as_str()
            );
            ReportKind::Maintenance
        }
        None => {
            log::debug!("{} CLASSIFY kind=outage", ctx);
            ReportKind::Outage
        }
    }
}
