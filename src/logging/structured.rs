//! Structured logging utilities.
//!
//! Provides context-aware logging with message_id and block index included
//! in every log message.

use std::fmt;

/// Logging context for one chat message.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub message_id: String,
    pub block: Option<usize>,
}

impl LogContext {
    pub fn new(message_id: &str) -> Self {
        Self {
            message_id: message_id.to_string(),
            block: None,
        }
    }

    /// Narrow the context to a single block (1-based, as shown to operators).
    pub fn with_block(&self, index: usize) -> Self {
        Self {
            message_id: self.message_id.clone(),
            block: Some(index),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.block {
            Some(idx) => write!(f, "[msg={}] [block={}]", self.message_id, idx),
            None => write!(f, "[msg={}]", self.message_id),
        }
    }
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::info!(
            concat!("{} {}", $(" ", stringify!($key), "={:?}"),*),
            $ctx,
            $event,
            $($value),*
        );
    };
}

/// Log a warning message with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::warn!(
            concat!("{} {}", $(" ", stringify!($key), "={:?}"),*),
            $ctx,
            $event,
            $($value),*
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::debug!(
            concat!("{} {}", $(" ", stringify!($key), "={:?}"),*),
            $ctx,
            $event,
            $($value),*
        );
    };
}
