//! Logging setup for the command line.
//!
//! Log events go to stderr so they never mix with a document written to
//! stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// The level is picked in this order:
/// 1. `--verbose`: debug for easygen
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. warnings for easygen
pub fn init_logger(verbose: bool, quiet: bool) {
    let filter = if verbose {
        EnvFilter::new("easygen=debug")
    } else if quiet {
        EnvFilter::new("easygen=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("easygen=warn"))
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(std::env::var_os("NO_COLOR").is_none())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
