//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.
//! Defaults are passed into validation explicitly so concurrent invocations
//! never share mutable state.

use std::time::Duration;

/// Default number of seconds between connection attempts.
pub const INTERVAL_SECS: u64 = 2;

/// Default per-attempt connection timeout in seconds.
pub const DIAL_TIMEOUT_SECS: u64 = 1;

/// Default for attaching auxiliary fields to reported events.
pub const LOG_FIELDS: bool = false;

/// Default interval between connection attempts as Duration.
#[must_use]
pub const fn interval() -> Duration {
    Duration::from_secs(INTERVAL_SECS)
}

/// Default per-attempt connection timeout as Duration.
#[must_use]
pub const fn dial_timeout() -> Duration {
    Duration::from_secs(DIAL_TIMEOUT_SECS)
}
