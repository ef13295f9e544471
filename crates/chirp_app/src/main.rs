mod cli;
mod config;
mod logging;

use std::process::ExitCode;

use chirp_core::RunOutcome;
use chirp_engine::{ActivityLog, PhotoStore, RunLock, Workflow, XPublisher};
use chirp_logging::{chirp_error, chirp_info};
use clap::Parser;

use crate::cli::Cli;
use crate::config::AppConfig;

/// Exit status for a run that posted a photo.
const EXIT_POSTED: u8 = 0;
/// Startup failure: configuration, lock or runtime.
const EXIT_FAILURE: u8 = 1;
/// Every attempt failed, or the pool drained after failures.
const EXIT_EXHAUSTED: u8 = 2;
/// The pending directory was empty.
const EXIT_NOTHING_PENDING: u8 = 3;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::initialize(cli.verbose);

    match run(cli) {
        Ok(outcome) => ExitCode::from(exit_code(&outcome)),
        Err(err) => {
            chirp_error!("{:#}", err);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<RunOutcome> {
    let config = AppConfig::load(&cli)?;
    let _lock = RunLock::acquire(&config.root)?;

    let store = PhotoStore::new(&config.root);
    let log = ActivityLog::new(&config.log_file);
    let publisher = XPublisher::new(config.credentials.clone(), config.publish.clone());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(
        Workflow::new(&store, &publisher, &log)
            .with_ceiling(config.max_attempts)
            .run(),
    );

    match &outcome {
        RunOutcome::Posted { name, attempts, .. } => {
            chirp_info!("Posted '{}' after {} attempt(s)", name, attempts)
        }
        RunOutcome::NothingPending => chirp_info!("Nothing to post"),
        RunOutcome::Exhausted { attempts, .. } => {
            chirp_info!("Gave up after {} failed attempt(s)", attempts)
        }
    }
    Ok(outcome)
}

fn exit_code(outcome: &RunOutcome) -> u8 {
    match outcome {
        RunOutcome::Posted { .. } => EXIT_POSTED,
        RunOutcome::Exhausted { .. } => EXIT_EXHAUSTED,
        RunOutcome::NothingPending => EXIT_NOTHING_PENDING,
    }
}
