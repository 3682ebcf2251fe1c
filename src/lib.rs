//! tcpwait: TCP readiness gate
//!
//! A library for gating process startup on a downstream TCP service:
//! repeatedly attempt a connection until one succeeds, the caller asks to
//! stop, or an overall deadline expires.

pub mod config;
pub mod probe;
pub mod report;
