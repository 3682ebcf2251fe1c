//! One bounded connection attempt.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time;

use super::cancel::{ProbeContext, StopCause};

/// Outcome of a single dial attempt.
#[derive(Debug)]
pub(crate) enum DialOutcome {
    /// The target accepted a connection (closed again immediately).
    Connected,
    /// The attempt failed; the cause is an opaque description.
    Failed(String),
    /// Cancellation fired before the attempt resolved.
    Stopped(StopCause),
}

/// Attempts a TCP connection to `address`, bounded by `timeout` and
/// interruptible by the context.
///
/// The select is biased with the connect branch first: a dial that has
/// already completed wins over a simultaneously fired cancellation, so a
/// successfully opened connection is never rolled back into a stop.
pub(crate) async fn dial(address: &str, timeout: Duration, ctx: &ProbeContext) -> DialOutcome {
    tokio::select! {
        biased;

        result = time::timeout(timeout, TcpStream::connect(address)) => match result {
            Ok(Ok(stream)) => {
                drop(stream);
                DialOutcome::Connected
            }
            Ok(Err(e)) => DialOutcome::Failed(e.to_string()),
            Err(_) => DialOutcome::Failed(format!(
                "connection attempt timed out after {}",
                humantime::format_duration(timeout)
            )),
        },

        cause = ctx.stopped() => DialOutcome::Stopped(cause),
    }
}
