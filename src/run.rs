//! Application execution logic.
//!
//! This module wires OS signals and the optional overall deadline into a
//! probe context and drives the readiness poller.

use std::time::Duration;

use tokio::signal;

use tcpwait::config::Config;
use tcpwait::probe::{self, ProbeContext, WaitError};
use tcpwait::report::TracingReporter;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Executes the readiness probe.
///
/// Installs a signal watcher that requests a graceful stop on Ctrl+C or
/// SIGTERM, applies `wait_timeout` as the overall deadline when given, and
/// runs the poller with a tracing-backed reporter.
///
/// # Errors
///
/// Returns [`WaitError::DeadlineExceeded`] when `wait_timeout` elapses
/// before the target accepts a connection. A signal-triggered stop returns
/// `Ok(())`.
///
/// # Coverage Note
///
/// Excluded from coverage because it installs real signal handlers.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: Config, wait_timeout: Option<Duration>) -> Result<(), WaitError> {
    let ctx = match wait_timeout {
        Some(timeout) => ProbeContext::new().with_deadline(timeout),
        None => ProbeContext::new(),
    };

    let stopper = ctx.stopper();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::debug!("Shutdown signal received, stopping...");
        stopper.cancel();
    });

    probe::wait_for_ready(&config, &ctx, &TracingReporter::new()).await
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
