//! CLI argument parsing using clap.
//!
//! Flags mirror the environment settings and take precedence over them.
//! `--wait-timeout` bounds the whole wait rather than a single attempt and
//! is therefore not part of the validated configuration.

use std::time::Duration;

use clap::Parser;

/// tcpwait: TCP readiness gate
///
/// Repeatedly attempts a TCP connection to a target until it succeeds,
/// then exits. Intended as a preflight step that holds back a dependent
/// process until a downstream service accepts connections.
#[derive(Debug, Parser)]
#[command(name = "tcpwait")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Target to probe in 'host:port' form (overrides TARGET_ADDRESS)
    #[arg(long = "target-address", value_name = "HOST:PORT")]
    pub target_address: Option<String>,

    /// Display name for the target (overrides TARGET_NAME)
    #[arg(long = "target-name", value_name = "NAME")]
    pub target_name: Option<String>,

    /// Wait between failed attempts, e.g. '2s' or '500ms' (overrides INTERVAL)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Timeout for each connection attempt (overrides DIAL_TIMEOUT)
    #[arg(long = "dial-timeout", value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub dial_timeout: Option<Duration>,

    /// Attach target and settings fields to every log line (overrides LOG_FIELDS)
    #[arg(long = "log-fields")]
    pub log_fields: bool,

    /// Give up with a non-zero exit after this long overall
    #[arg(long = "wait-timeout", value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub wait_timeout: Option<Duration>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
