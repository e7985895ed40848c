//! stderr logging using env_logger
//!
//! The report itself goes to stdout, so log records never mix with it.
//! Verbosity follows `RUST_LOG`, defaulting to warnings only.

use env_logger::{Env, Target};

/// Initialize logging, `verbose` lowers the default level to debug
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Stderr)
        .format_timestamp_secs()
        .init();
}
