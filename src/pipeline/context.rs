//! Pipeline context management.
//!
//! Provides per-message context for logging and date resolution.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::config::SheetConfig;
use crate::logging::structured::LogContext;
use crate::storage::models::RawMessage;

/// Context for one received chat message.
#[derive(Debug, Clone)]
pub struct MessageContext {
    pub message_id: String,
    pub origin_id: String,
    pub received_at: DateTime<Utc>,
}

impl MessageContext {
    /// Build a context from a message. A missing or out-of-range timestamp
    /// falls back to the current time.
    pub fn new(message: &RawMessage) -> Self {
        let message_id = format!("msg-{}", &Uuid::new_v4().simple().to_string()[..8]);

        let received_at = message
            .timestamp_epoch_seconds
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .unwrap_or_else(Utc::now);

        Self {
            message_id,
            origin_id: message.origin_id.clone(),
            received_at,
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.message_id)
    }

    /// Calendar date of the message in the configured offset.
    pub fn today(&self, cfg: &SheetConfig) -> NaiveDate {
        cfg.localize(self.received_at).date_naive()
    }

    /// Message time as `YYYY-MM-DD HH.MM` in the configured offset.
    pub fn formatted_timestamp(&self, cfg: &SheetConfig) -> String {
        format_message_timestamp(self.received_at, cfg)
    }
}

pub fn format_message_timestamp(at: DateTime<Utc>, cfg: &SheetConfig) -> String {
    cfg.localize(at).format("%Y-%m-%d %H.%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-10-14 17:30:00 UTC = 2025-10-15 00:30 WIB
    const LATE_EVENING_UTC: i64 = 1_760_463_000;

    #[test]
    fn test_message_id_format() {
        let ctx = MessageContext::new(&RawMessage::new("x", None, "chat-1"));
        assert!(ctx.message_id.starts_with("msg-"));
        assert_eq!(ctx.message_id.len(), 12);
        assert_eq!(ctx.origin_id, "chat-1");
    }

    #[test]
    fn test_today_uses_configured_offset() {
        let ctx = MessageContext::new(&RawMessage::new("x", Some(LATE_EVENING_UTC), ""));
        let cfg = SheetConfig::default();
        assert_eq!(ctx.today(&cfg), NaiveDate::from_ymd_opt(2025, 10, 15).unwrap());

        let utc = SheetConfig {
            utc_offset_hours: 0,
            ..SheetConfig::default()
        };
        assert_eq!(ctx.today(&utc), NaiveDate::from_ymd_opt(2025, 10, 14).unwrap());
    }

    #[test]
    fn test_formatted_timestamp() {
        let ctx = MessageContext::new(&RawMessage::new("x", Some(LATE_EVENING_UTC), ""));
        assert_eq!(ctx.formatted_timestamp(&SheetConfig::default()), "2025-10-15 00.30");
    }

    #[test]
    fn test_missing_timestamp_uses_now() {
        let before = Utc::now();
        let ctx = MessageContext::new(&RawMessage::new("x", None, ""));
        assert!(ctx.received_at >= before);
    }
}
