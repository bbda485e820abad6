// Logging setup for the CLI (stderr only).
//
// RUST_LOG overrides the default filter.

use tracing_subscriber::{EnvFilter, fmt};

pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "members_gen=debug,info"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
