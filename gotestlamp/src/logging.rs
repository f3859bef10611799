use std::io::IsTerminal;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{Layer, filter::Targets, layer::SubscriberExt, util::SubscriberInitExt};

/// Overrides the verbosity-derived filter, e.g. `GOTESTLAMP_LOG=gotestlamp=trace`.
pub const LOG_ENV: &str = "GOTESTLAMP_LOG";

fn default_targets(verbose: bool) -> Targets {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    Targets::new().with_default(level)
}

pub fn log_targets(verbose: bool) -> Targets {
    std::env::var(LOG_ENV)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse::<Targets>().ok())
        .unwrap_or_else(|| default_targets(verbose))
}

/// Installs the stderr subscriber. Later calls are no-ops.
pub fn init_logging(verbose: bool) {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbose)
        .without_time()
        .with_filter(log_targets(verbose));

    let _ = tracing_subscriber::registry().with(layer).try_init();
}
