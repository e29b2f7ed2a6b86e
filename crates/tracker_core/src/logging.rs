//! Injected structured-logging capability.
//!
//! The core never logs on its own behalf; it holds the logger a caller
//! injects at construction and hands it to vendor code, which does the
//! actual logging. No global logging state is consulted.

use std::fmt;
use tracing::Level;

/// Structured log sink injected into every tracker.
///
/// `fields` is the structured context attached to the event. Implementations
/// must not assume any particular key set.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str, fields: &[(&str, String)]);

    fn debug(&self, message: &str, fields: &[(&str, String)]) {
        self.log(Level::DEBUG, message, fields);
    }

    fn info(&self, message: &str, fields: &[(&str, String)]) {
        self.log(Level::INFO, message, fields);
    }

    fn warn(&self, message: &str, fields: &[(&str, String)]) {
        self.log(Level::WARN, message, fields);
    }

    fn error(&self, message: &str, fields: &[(&str, String)]) {
        self.log(Level::ERROR, message, fields);
    }
}

/// [`Logger`] backed by the `tracing` ecosystem.
///
/// Events carry the caller's context under a single `context` field; the
/// active subscriber decides formatting and filtering.
#[derive(Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl fmt::Debug for TracingLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TracingLogger")
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str, fields: &[(&str, String)]) {
        if level == Level::ERROR {
            tracing::error!(context = ?fields, "{message}");
        } else if level == Level::WARN {
            tracing::warn!(context = ?fields, "{message}");
        } else if level == Level::INFO {
            tracing::info!(context = ?fields, "{message}");
        } else if level == Level::DEBUG {
            tracing::debug!(context = ?fields, "{message}");
        } else {
            tracing::trace!(context = ?fields, "{message}");
        }
    }
}
