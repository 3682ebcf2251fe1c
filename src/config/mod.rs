//! Configuration layer for tcpwait.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`])
//! - The raw settings lookup ([`EnvSource`]) and its well-known names
//! - Validated configuration ([`Config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to
//! lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **Environment lookup** - Raw string settings, conventionally process
//!    environment variables; an absent key is indistinguishable from an
//!    explicitly empty value
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The one required setting is the target address. The display name is
//! optional and derived from the target host when absent.
//!
//! # Boolean Flag Semantics
//!
//! `--log-fields` only enables: once set on the CLI it cannot be turned back
//! off by the environment, matching the other options where an explicit CLI
//! value wins.

mod cli;
pub mod defaults;
mod env;
mod error;
mod validated;


pub use cli::Cli;
pub use env::{EnvSource, key};
pub use error::ConfigError;
pub use validated::Config;
