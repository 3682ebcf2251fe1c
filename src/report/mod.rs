//! Structured event reporting.
//!
//! The probe loop emits structured events (level, message, fields) through
//! the [`Reporter`] trait and never renders log lines itself. The production
//! implementation [`TracingReporter`] forwards events to `tracing`; tests
//! substitute in-memory reporters to assert on the event sequence.

use std::fmt::Write as _;

/// Severity of a reported event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Normal progress (start, success).
    Info,
    /// A failed connection attempt.
    Warn,
}

/// One key/value pair attached to an event.
///
/// Keys are static names chosen by the probe loop; values are pre-rendered
/// strings (durations, error descriptions).
pub type Field = (&'static str, String);

/// Receiver for structured probe events.
///
/// Implementations decide how (and whether) events are rendered. Events
/// arrive in strict attempt order from a single caller, so implementations
/// do not need to reorder or buffer.
pub trait Reporter {
    /// Reports a single event.
    fn report(&self, level: Level, message: &str, fields: &[Field]);
}

/// Reporter that forwards events to the `tracing` subscriber.
///
/// Fields are rendered as a logfmt-style ` key=value` suffix; values
/// containing whitespace are quoted. Rendering happens here, not in the
/// probe loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl TracingReporter {
    /// Creates a new tracing-backed reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reporter for TracingReporter {
    fn report(&self, level: Level, message: &str, fields: &[Field]) {
        let line = render_line(message, fields);
        match level {
            Level::Info => tracing::info!("{line}"),
            Level::Warn => tracing::warn!("{line}"),
        }
    }
}

/// Renders a message plus fields into a single log line.
fn render_line(message: &str, fields: &[Field]) -> String {
    let mut line = String::from(message);
    for (key, value) in fields {
        if value.contains(char::is_whitespace) {
            let _ = write!(line, " {key}={value:?}");
        } else {
            let _ = write!(line, " {key}={value}");
        }
    }
    line
}
