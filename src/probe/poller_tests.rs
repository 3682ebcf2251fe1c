//! Tests for the connect-retry-cancel loop.
//!
//! Socket-backed scenarios run against real loopback listeners with short
//! intervals; loopback refusals resolve quickly enough to keep the timing
//! assertions loose.

use std::sync::Mutex;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::time::Instant;

use crate::config::Config;
use crate::report::{Field, Level, Reporter};

use super::cancel::ProbeContext;
use super::error::WaitError;
use super::poller::wait_for_ready;

/// One recorded event.
#[derive(Debug, Clone)]
struct Event {
    level: Level,
    message: String,
    fields: Vec<Field>,
}

/// Reporter that records events for later assertions.
#[derive(Default)]
struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }

    fn count_containing(&self, needle: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| e.message.contains(needle))
            .count()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, level: Level, message: &str, fields: &[Field]) {
        self.events.lock().unwrap().push(Event {
            level,
            message: message.to_string(),
            fields: fields.to_vec(),
        });
    }
}

fn config(address: &str, interval: Duration) -> Config {
    Config {
        target_address: address.to_string(),
        target_name: "db".to_string(),
        interval,
        dial_timeout: Duration::from_millis(100),
        log_fields: false,
    }
}

/// Returns a loopback address with nothing listening on it.
async fn refused_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    drop(listener);
    address
}

#[tokio::test]
async fn succeeds_immediately_when_target_listens() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let config = config(&address, Duration::from_millis(50));
    let ctx = ProbeContext::new();
    let reporter = RecordingReporter::default();

    let result = wait_for_ready(&config, &ctx, &reporter).await;

    assert_eq!(result, Ok(()));
    assert_eq!(
        reporter.messages(),
        vec![
            "waiting for db to become ready".to_string(),
            "db is ready".to_string(),
        ]
    );
}

#[tokio::test]
async fn stop_request_ends_the_loop_without_an_error() {
    let address = refused_address().await;
    let config = config(&address, Duration::from_millis(50));
    let ctx = ProbeContext::new();
    let reporter = RecordingReporter::default();

    let stopper = ctx.stopper();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(220)).await;
        stopper.cancel();
    });

    let result = wait_for_ready(&config, &ctx, &reporter).await;

    assert_eq!(result, Ok(()));
    assert!(reporter.count_containing("is not ready") >= 3);
    assert_eq!(reporter.count_containing("db is ready"), 0);
}

#[tokio::test]
async fn deadline_expiry_is_an_error() {
    let address = refused_address().await;
    let config = config(&address, Duration::from_millis(50));
    let ctx = ProbeContext::new().with_deadline(Duration::from_millis(500));
    let reporter = RecordingReporter::default();

    let started = Instant::now();
    let result = wait_for_ready(&config, &ctx, &reporter).await;
    let elapsed = started.elapsed();

    assert_eq!(
        result,
        Err(WaitError::DeadlineExceeded {
            target: "db".to_string()
        })
    );
    assert!(elapsed >= Duration::from_millis(400), "gave up too early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(2), "gave up too late: {elapsed:?}");
    assert_eq!(reporter.count_containing("db is ready"), 0);
    assert!(reporter.count_containing("is not ready") >= 1);
}

#[tokio::test]
async fn ready_on_the_third_attempt_keeps_event_order() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    drop(listener);

    // Attempts run at ~0ms, ~50ms, ~100ms; the listener comes back between
    // the second and third.
    let rebind = address.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(75)).await;
        let listener = TcpListener::bind(&rebind).await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        drop(listener);
    });

    let config = config(&address, Duration::from_millis(50));
    let ctx = ProbeContext::new();
    let reporter = RecordingReporter::default();

    let result = wait_for_ready(&config, &ctx, &reporter).await;

    assert_eq!(result, Ok(()));
    assert_eq!(
        reporter.messages(),
        vec![
            "waiting for db to become ready".to_string(),
            "db is not ready".to_string(),
            "db is not ready".to_string(),
            "db is ready".to_string(),
        ]
    );

    let events = reporter.events();
    assert_eq!(events[0].level, Level::Info);
    assert_eq!(events[1].level, Level::Warn);
    assert_eq!(events[2].level, Level::Warn);
    assert_eq!(events[3].level, Level::Info);
}

#[tokio::test]
async fn stop_request_preempts_the_interval_wait() {
    let address = refused_address().await;
    let config = config(&address, Duration::from_secs(600));
    let ctx = ProbeContext::new();
    let reporter = RecordingReporter::default();

    let stopper = ctx.stopper();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        stopper.cancel();
    });

    let started = Instant::now();
    let result = wait_for_ready(&config, &ctx, &reporter).await;

    assert_eq!(result, Ok(()));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn deadline_preempts_the_interval_wait() {
    let address = refused_address().await;
    let config = config(&address, Duration::from_secs(600));
    let ctx = ProbeContext::new().with_deadline(Duration::from_millis(200));
    let reporter = RecordingReporter::default();

    let started = Instant::now();
    let result = wait_for_ready(&config, &ctx, &reporter).await;

    assert!(result.is_err());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn already_stopped_context_skips_dialing() {
    let address = refused_address().await;
    let config = config(&address, Duration::from_millis(50));
    let ctx = ProbeContext::new();
    ctx.stop();
    let reporter = RecordingReporter::default();

    let result = wait_for_ready(&config, &ctx, &reporter).await;

    assert_eq!(result, Ok(()));
    // Only the start event; no attempt was made.
    assert_eq!(reporter.messages(), vec!["waiting for db to become ready"]);
}

#[tokio::test]
async fn already_expired_deadline_is_an_error_before_dialing() {
    let address = refused_address().await;
    let config = config(&address, Duration::from_millis(50));
    let ctx = ProbeContext::new().with_deadline(Duration::ZERO);
    tokio::time::sleep(Duration::from_millis(5)).await;
    let reporter = RecordingReporter::default();

    let result = wait_for_ready(&config, &ctx, &reporter).await;

    assert!(result.is_err());
    assert_eq!(reporter.messages(), vec!["waiting for db to become ready"]);
}

#[tokio::test]
async fn events_carry_no_fields_by_default() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let config = config(&address, Duration::from_millis(50));
    let ctx = ProbeContext::new();
    let reporter = RecordingReporter::default();

    wait_for_ready(&config, &ctx, &reporter).await.unwrap();

    for event in reporter.events() {
        assert!(event.fields.is_empty());
    }
}

#[tokio::test]
async fn log_fields_attaches_settings_and_dial_errors() {
    let address = refused_address().await;
    let mut config = config(&address, Duration::from_millis(50));
    config.log_fields = true;

    let ctx = ProbeContext::new();
    let reporter = RecordingReporter::default();

    let stopper = ctx.stopper();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(120)).await;
        stopper.cancel();
    });

    wait_for_ready(&config, &ctx, &reporter).await.unwrap();

    let events = reporter.events();
    let start = &events[0];
    let keys: Vec<&str> = start.fields.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        keys,
        vec![
            "target_name",
            "target_address",
            "interval",
            "dial_timeout",
            "version"
        ]
    );

    let failure = events
        .iter()
        .find(|e| e.message.contains("is not ready"))
        .expect("at least one failure event");
    let error = failure
        .fields
        .iter()
        .find(|(k, _)| *k == "error")
        .expect("failure carries the dial error");
    assert!(!error.1.is_empty());
}
