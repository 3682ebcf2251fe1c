//! tcpwait: TCP readiness gate
//!
//! Entry point for the tcpwait binary.

use std::process::ExitCode;

use tcpwait::config::{Cli, Config};

mod app;
mod run;

use app::{exit_code, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Load and validate configuration
    let config = match Config::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(cli.verbose);
    tracing::debug!("{config}");

    run_application(config, cli.wait_timeout)
}

/// Runs the readiness probe with the given configuration.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_application(config: Config, wait_timeout: Option<std::time::Duration>) -> ExitCode {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    match runtime.block_on(run::execute(config, wait_timeout)) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            exit_code::runtime_error()
        }
    }
}
