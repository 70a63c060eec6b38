//! Logging bootstrap for the command-line tool.
//!
//! Diagnostics go to stderr through `tracing`. The filter comes from
//! `FSMANIFEST_LOG` or `RUST_LOG` when set, otherwise from the `-v` count.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

const ENV_FILTER_VARS: [&str; 2] = ["FSMANIFEST_LOG", "RUST_LOG"];

/// Map a `-v` count to a level: warn, info, debug, then trace.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn directive(verbosity: u8) -> String {
    ENV_FILTER_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| level_for_verbosity(verbosity).to_string())
}

/// Install the global subscriber. Call once, early in `main`.
pub fn init(verbosity: u8, use_color: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_new(directive(verbosity)).context("parsing log filter directive")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("installing log subscriber")
}
