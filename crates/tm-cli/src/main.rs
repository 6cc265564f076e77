//! `tiled-matmul` - runs the tiled matmul kernel on generated inputs and
//! verifies it against the serial reference.
//!
//! Exit codes: 0 when every element is within tolerance, 1 when any element
//! is not, 2 for an invalid configuration.

use std::process::ExitCode;

use clap::Parser;
use tm_cli::{logging, Args, Result, RunConfig};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match RunConfig::try_from(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(2);
        }
    };

    match execute(&config) {
        Ok(passed) => {
            println!("{}", if passed { "SUCCESS" } else { "FAILURE" });
            if passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            error!("{}", e);
            println!("FAILURE");
            ExitCode::FAILURE
        }
    }
}

fn execute(config: &RunConfig) -> Result<bool> {
    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
        info!(threads, "configured worker pool");
    }

    let outcome = tm_cli::run(config)?;
    info!(
        verdict = outcome.verdict(),
        kernel_ms = outcome.kernel_time.as_secs_f64() * 1e3,
        reference_ms = outcome.reference_time.as_secs_f64() * 1e3,
        "done"
    );
    Ok(outcome.passed())
}
