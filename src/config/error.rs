//! Error types for configuration parsing and validation.

use thiserror::Error;

/// Error type for configuration operations.
///
/// Each variant corresponds to exactly one violated rule; validation
/// short-circuits on the first violation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The target address was not provided by any source.
    #[error(
        "Missing required setting: TARGET_ADDRESS. Set the TARGET_ADDRESS environment variable or pass --target-address"
    )]
    MissingAddress,

    /// The target address carries a URI scheme prefix.
    #[error("Target address should not include a scheme ({scheme})")]
    SchemeInAddress {
        /// The scheme found in front of `://`
        scheme: String,
    },

    /// The target address is not in `host:port` form.
    #[error("Invalid target address '{address}': must be host:port")]
    AddressFormat {
        /// The rejected address string
        address: String,
    },

    /// A duration setting failed to parse.
    #[error("Invalid duration for {setting}: {source}")]
    InvalidDuration {
        /// Name of the setting
        setting: &'static str,
        /// Underlying parse error
        #[source]
        source: humantime::DurationError,
    },

    /// A duration setting was negative.
    #[error("Invalid duration for {setting}: cannot be negative")]
    NegativeDuration {
        /// Name of the setting
        setting: &'static str,
    },

    /// A boolean flag setting was neither true nor false.
    #[error("Invalid value for {setting} '{value}': expected true or false")]
    InvalidFlag {
        /// Name of the setting
        setting: &'static str,
        /// The rejected value
        value: String,
    },
}
