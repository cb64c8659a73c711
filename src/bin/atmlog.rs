//! Read one chat message from stdin and print its rows as JSON lines.
//!
//! The sheet config is read from the path in `ATMLOG_CONFIG`; defaults are
//! used when it is unset.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use parking_lot::Mutex;
use serde_json::json;

use atmlog_core::{
    init_logger, process_message, AppendOutcome, RawMessage, Row, RowSink, SheetConfig,
    SinkError,
};

/// Writes each row to stdout instead of a sheet.
struct StdoutSink {
    written: Mutex<usize>,
}

impl RowSink for StdoutSink {
    fn append(&self, row: &Row, sheet: &str) -> Result<AppendOutcome, SinkError> {
        let mut written = self.written.lock();
        let line = json!({ "sheet": sheet, "kind": row.kind, "cells": row.without_numbering() });
        writeln!(io::stdout().lock(), "{}", line).map_err(|e| SinkError::Io(e.to_string()))?;
        *written += 1;
        Ok(AppendOutcome {
            sheet: sheet.to_string(),
            row_number: *written,
            updated_range: String::new(),
        })
    }
}

fn load_config() -> anyhow::Result<SheetConfig> {
    match std::env::var_os("ATMLOG_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            SheetConfig::from_path(&path)
                .with_context(|| format!("loading sheet config from {}", path.display()))
        }
        None => Ok(SheetConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let cfg = load_config()?;
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("reading message from stdin")?;

    let now = chrono::Utc::now().timestamp();
    let message = RawMessage::new(&text, Some(now), "stdin");
    let sink = StdoutSink {
        written: Mutex::new(0),
    };

    let outcome = process_message(&message, &cfg, &sink);
    if let Some(reason) = outcome.rejection_reason {
        anyhow::bail!("message rejected: {}", reason);
    }
    Ok(())
}
