//! Environment-variable configuration source.
//!
//! The validator reads raw settings through an opaque name→string lookup.
//! An absent key is indistinguishable from an explicitly empty value; both
//! fall back to the documented default. The lookup is injectable so tests
//! can supply settings without touching the process environment.

use std::collections::HashMap;

/// Well-known setting names.
pub mod key {
    /// The dial target in `host:port` form (required).
    pub const TARGET_ADDRESS: &str = "TARGET_ADDRESS";
    /// Display name for the target (optional, derived from the host when absent).
    pub const TARGET_NAME: &str = "TARGET_NAME";
    /// Wait between failed attempts (optional duration string).
    pub const INTERVAL: &str = "INTERVAL";
    /// Per-attempt connection timeout (optional duration string).
    pub const DIAL_TIMEOUT: &str = "DIAL_TIMEOUT";
    /// Whether to attach auxiliary fields to events (optional boolean string).
    pub const LOG_FIELDS: &str = "LOG_FIELDS";
}

/// A name→string lookup over raw configuration settings.
pub struct EnvSource {
    lookup: Box<dyn Fn(&str) -> String + Send + Sync>,
}

impl EnvSource {
    /// Creates a source backed by an arbitrary lookup function.
    pub fn new<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }

    /// Creates a source backed by the process environment.
    #[must_use]
    pub fn process() -> Self {
        Self::new(|name| std::env::var(name).unwrap_or_default())
    }

    /// Creates a source backed by an in-memory map (useful for testing).
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self::new(move |name| map.get(name).cloned().unwrap_or_default())
    }

    /// Returns the raw value for a setting, empty when absent.
    #[must_use]
    pub fn get(&self, name: &str) -> String {
        (self.lookup)(name)
    }
}

impl std::fmt::Debug for EnvSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSource").finish_non_exhaustive()
    }
}
