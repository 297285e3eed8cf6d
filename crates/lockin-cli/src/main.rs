use lockin_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the data dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", err);
    }

    // Parse CLI and dispatch.
    if let Err(err) = cli::run_from_args(std::env::args_os()) {
        cli::report_fatal(&err);
        std::process::exit(1);
    }
}
