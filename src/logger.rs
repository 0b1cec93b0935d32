//! Console logging for the library and the menu binary.
//!
//! Output goes through `env_logger`. This crate logs at the level passed to
//! [`initialize_logger`]; every other target is held at `warn`. `RUST_LOG`
//! is parsed last and wins over both.

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

/// Target prefix of every log record this crate emits
const CRATE_TARGET: &str = "bid_hashtable";

static INIT: Once = Once::new();

/// Filters applied before `RUST_LOG` is consulted
fn filter_builder(level: LevelFilter) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module(CRATE_TARGET, level);
    builder
}

/// Install the console logger.
///
/// Only the first call installs anything. A logger set up elsewhere (test
/// harness, embedding binary) is left in place.
pub fn initialize_logger(level: LevelFilter) {
    INIT.call_once_force(|_| {
        let mut builder = filter_builder(level);
        builder.format_timestamp_millis().parse_default_env();

        let _ = builder.try_init();
    });
}
