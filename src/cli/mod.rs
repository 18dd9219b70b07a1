//! Command-line plumbing shared by the binary: logging setup and the
//! workflows behind each subcommand.

pub mod orchestration;

pub use orchestration::{
    run_extract, run_pull_request, run_version, ExtractArgs, LocalBackend, PullRequestArgs, VersionArgs,
};

use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the stderr log subscriber.
///
/// `RUST_LOG` selects the filter, defaulting to `info`; `verbose` forces `debug`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init();
}
