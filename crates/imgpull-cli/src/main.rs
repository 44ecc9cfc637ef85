use imgpull_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible.
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("log file unavailable, logging to stderr: {:#}", e);
    }

    if let Err(err) = Cli::run_from_args() {
        eprintln!("imgpull error: {:#}", err);
        std::process::exit(1);
    }
}
