//! Readiness probing.
//!
//! This module owns the connect-retry-cancel state machine:
//!
//! ```text
//! Probing --dial succeeds--> Ready    (terminal, Ok)
//! Probing --dial fails-----> wait out the interval, back to Probing
//! Probing --stop request---> Stopped  (terminal, Ok)
//! Probing --deadline-------> Stopped  (terminal, DeadlineExceeded)
//! ```
//!
//! Cancellation preempts both the dial and the inter-attempt wait; see
//! [`ProbeContext`] for the two stop causes and their tie-break.

mod cancel;
mod dial;
mod error;
mod poller;

#[cfg(test)]
mod poller_tests;

pub use cancel::{ProbeContext, StopCause};
pub use error::WaitError;
pub use poller::wait_for_ready;
