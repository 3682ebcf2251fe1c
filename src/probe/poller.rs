//! The connect-retry-cancel loop.

use tokio::time;

use crate::config::Config;
use crate::report::{Field, Level, Reporter};

use super::cancel::{ProbeContext, StopCause};
use super::dial::{DialOutcome, dial};
use super::error::WaitError;

/// Waits until the configured target accepts a TCP connection.
///
/// Emits a start event, then alternates bounded dial attempts with
/// interruptible fixed-interval waits. The first attempt runs immediately.
/// At most one dial is in flight at any time and no attempt is made after
/// the function returns.
///
/// Returns `Ok(())` when the target accepted a connection or when an
/// explicit stop was requested; an expired deadline is the only error.
/// Failed attempts are retried indefinitely and reach the caller only as
/// reported events.
///
/// # Errors
///
/// Returns [`WaitError::DeadlineExceeded`] when the context deadline fires
/// before the target becomes ready.
pub async fn wait_for_ready<R: Reporter>(
    config: &Config,
    ctx: &ProbeContext,
    reporter: &R,
) -> Result<(), WaitError> {
    let fields = context_fields(config);
    let name = &config.target_name;

    reporter.report(
        Level::Info,
        &format!("waiting for {name} to become ready"),
        &fields,
    );

    loop {
        if let Some(cause) = ctx.stop_cause() {
            return finish(cause, config);
        }

        match dial(&config.target_address, config.dial_timeout, ctx).await {
            DialOutcome::Connected => {
                reporter.report(Level::Info, &format!("{name} is ready"), &fields);
                return Ok(());
            }
            DialOutcome::Failed(cause) => {
                reporter.report(
                    Level::Warn,
                    &format!("{name} is not ready"),
                    &with_error(&fields, config, cause),
                );

                tokio::select! {
                    biased;

                    cause = ctx.stopped() => return finish(cause, config),
                    () = time::sleep(config.interval) => {}
                }
            }
            DialOutcome::Stopped(cause) => return finish(cause, config),
        }
    }
}

fn finish(cause: StopCause, config: &Config) -> Result<(), WaitError> {
    match cause {
        StopCause::Requested => Ok(()),
        StopCause::DeadlineExceeded => Err(WaitError::DeadlineExceeded {
            target: config.target_name.clone(),
        }),
    }
}

/// Target and settings fields attached to every event when `log_fields` is
/// set; empty otherwise.
fn context_fields(config: &Config) -> Vec<Field> {
    if !config.log_fields {
        return Vec::new();
    }

    vec![
        ("target_name", config.target_name.clone()),
        ("target_address", config.target_address.clone()),
        (
            "interval",
            humantime::format_duration(config.interval).to_string(),
        ),
        (
            "dial_timeout",
            humantime::format_duration(config.dial_timeout).to_string(),
        ),
        ("version", env!("CARGO_PKG_VERSION").to_string()),
    ]
}

/// Failure fields: the context fields plus the dial error.
fn with_error(fields: &[Field], config: &Config, cause: String) -> Vec<Field> {
    if !config.log_fields {
        return Vec::new();
    }

    let mut fields = fields.to_vec();
    fields.push(("error", cause));
    fields
}
