//! Validated configuration after merging CLI and environment sources.
//!
//! This module contains the final, immutable configuration used by the
//! probe loop. All validation is performed during construction; the first
//! violated rule wins and nothing after it is evaluated.

use std::fmt;
use std::time::Duration;

use super::cli::Cli;
use super::defaults;
use super::env::{EnvSource, key};
use super::error::ConfigError;

/// Fully validated configuration ready for use by the probe loop.
///
/// # Construction
///
/// Use [`Config::from_raw`] to build from CLI arguments and a raw settings
/// lookup. Explicit CLI values win over the lookup, which wins over the
/// built-in defaults. The result is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Dial target in `host:port` form, used verbatim.
    pub target_address: String,

    /// Display name for the target. Derived from the host portion of the
    /// address (up to the first `.`) when not supplied.
    pub target_name: String,

    /// Wait between failed connection attempts.
    pub interval: Duration,

    /// Timeout for each connection attempt.
    pub dial_timeout: Duration,

    /// Whether auxiliary fields are attached to reported events.
    pub log_fields: bool,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ target: {} ({}), interval: {}, dial_timeout: {}, log_fields: {} }}",
            self.target_name,
            self.target_address,
            humantime::format_duration(self.interval),
            humantime::format_duration(self.dial_timeout),
            self.log_fields,
        )
    }
}

impl Config {
    /// Creates a validated configuration from CLI arguments and a raw lookup.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule, in order:
    /// - target address missing
    /// - target address carries a `scheme://` prefix
    /// - target address is not `host:port`
    /// - `INTERVAL` / `DIAL_TIMEOUT` fail to parse or are negative
    /// - `LOG_FIELDS` is not a boolean
    pub fn from_raw(cli: &Cli, env: &EnvSource) -> Result<Self, ConfigError> {
        let target_address = Self::resolve_address(cli, env)?;

        // Name derivation only runs once the address has validated.
        let target_name = Self::resolve_name(&target_address, cli, env);

        let interval = Self::resolve_duration(cli.interval, env, key::INTERVAL, defaults::interval())?;

        let dial_timeout = Self::resolve_duration(
            cli.dial_timeout,
            env,
            key::DIAL_TIMEOUT,
            defaults::dial_timeout(),
        )?;

        let log_fields = Self::resolve_log_fields(cli, env)?;

        Ok(Self {
            target_address,
            target_name,
            interval,
            dial_timeout,
            log_fields,
        })
    }

    /// Creates a validated configuration from CLI arguments and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Same rules as [`Config::from_raw`].
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::from_raw(cli, &EnvSource::process())
    }

    fn resolve_address(cli: &Cli, env: &EnvSource) -> Result<String, ConfigError> {
        let address = cli
            .target_address
            .clone()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| env.get(key::TARGET_ADDRESS));

        if address.is_empty() {
            return Err(ConfigError::MissingAddress);
        }

        if let Some((scheme, _)) = address.split_once("://") {
            return Err(ConfigError::SchemeInAddress {
                scheme: scheme.to_string(),
            });
        }

        // Must be host:port with a non-empty host; the port is the dialer's
        // problem and stays unchecked here.
        match address.rsplit_once(':') {
            Some((host, _)) if !host.is_empty() => Ok(address),
            _ => Err(ConfigError::AddressFormat { address }),
        }
    }

    /// Picks the explicit name or derives one from the host portion of the
    /// (already validated) address: everything up to the first `.`, or the
    /// whole host when it has none.
    fn resolve_name(address: &str, cli: &Cli, env: &EnvSource) -> String {
        let explicit = cli
            .target_name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| env.get(key::TARGET_NAME));

        if !explicit.is_empty() {
            return explicit;
        }

        let host = address.rsplit_once(':').map_or(address, |(host, _)| host);
        host.split('.').next().unwrap_or(host).to_string()
    }

    fn resolve_duration(
        cli_value: Option<Duration>,
        env: &EnvSource,
        setting: &'static str,
        default: Duration,
    ) -> Result<Duration, ConfigError> {
        if let Some(value) = cli_value {
            return Ok(value);
        }

        let raw = env.get(setting);
        if raw.is_empty() {
            return Ok(default);
        }

        let trimmed = raw.trim();
        if trimmed.starts_with('-') {
            return Err(ConfigError::NegativeDuration { setting });
        }

        humantime::parse_duration(trimmed)
            .map_err(|source| ConfigError::InvalidDuration { setting, source })
    }

    fn resolve_log_fields(cli: &Cli, env: &EnvSource) -> Result<bool, ConfigError> {
        if cli.log_fields {
            return Ok(true);
        }

        let raw = env.get(key::LOG_FIELDS);
        if raw.is_empty() {
            return Ok(defaults::LOG_FIELDS);
        }

        parse_bool(&raw).ok_or_else(|| ConfigError::InvalidFlag {
            setting: key::LOG_FIELDS,
            value: raw,
        })
    }
}

/// Parses a boolean setting string.
///
/// Accepts the usual spellings: `1`, `t`, `true`, `True`, `TRUE` and their
/// false counterparts.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "t" | "T" | "true" | "True" | "TRUE" => Some(true),
        "0" | "f" | "F" | "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}
