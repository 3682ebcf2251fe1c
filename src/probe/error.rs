//! Error type for the probe loop.

use thiserror::Error;

/// Error returned by [`wait_for_ready`](super::wait_for_ready).
///
/// Transient connection failures never surface here; they are absorbed by
/// the retry loop and visible only through the Reporter stream. An explicit
/// stop request is not an error either.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaitError {
    /// The overall deadline elapsed before the target accepted a connection.
    #[error("timed out waiting for {target} to become ready")]
    DeadlineExceeded {
        /// Display name of the target.
        target: String,
    },
}
