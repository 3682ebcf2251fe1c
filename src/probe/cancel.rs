//! Cooperative cancellation for the probe loop.
//!
//! Two independent causes can end a probe early: an explicit stop request
//! (typically an OS signal) and an optional overall deadline. They are kept
//! apart as a tagged [`StopCause`] because they mean different things to the
//! caller: a requested stop is a graceful exit, an expired deadline is a
//! failure to become ready in time.

use std::time::Duration;

use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

/// Why the probe loop was asked to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCause {
    /// An explicit stop request. Not an error.
    Requested,
    /// The overall deadline elapsed before the target became ready.
    DeadlineExceeded,
}

/// Cancellation context for one probe invocation.
///
/// Each invocation owns its own context; concurrent probes share nothing.
/// Both causes interrupt the dial and the inter-attempt wait without
/// waiting for their own timers to expire.
#[derive(Debug, Clone, Default)]
pub struct ProbeContext {
    stop: CancellationToken,
    deadline: Option<Instant>,
}

impl ProbeContext {
    /// Creates a context with no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overall deadline to `after` from now.
    #[must_use]
    pub fn with_deadline(mut self, after: Duration) -> Self {
        self.deadline = Some(Instant::now() + after);
        self
    }

    /// Returns a handle that stops the probe when cancelled.
    #[must_use]
    pub fn stopper(&self) -> CancellationToken {
        self.stop.clone()
    }

    /// Requests a graceful stop.
    pub fn stop(&self) {
        self.stop.cancel();
    }

    /// Non-blocking check for an already-fired stop cause.
    ///
    /// An explicit stop wins over a simultaneously expired deadline.
    pub(crate) fn stop_cause(&self) -> Option<StopCause> {
        if self.stop.is_cancelled() {
            return Some(StopCause::Requested);
        }
        match self.deadline {
            Some(at) if Instant::now() >= at => Some(StopCause::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once either stop cause fires.
    ///
    /// The select is biased with the stop token first so an explicit stop
    /// wins when both causes are observable.
    pub(crate) async fn stopped(&self) -> StopCause {
        match self.deadline {
            Some(at) => {
                tokio::select! {
                    biased;

                    () = self.stop.cancelled() => StopCause::Requested,
                    () = time::sleep_until(at) => StopCause::DeadlineExceeded,
                }
            }
            None => {
                self.stop.cancelled().await;
                StopCause::Requested
            }
        }
    }
}
