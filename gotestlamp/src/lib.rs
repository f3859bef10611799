pub mod args;
pub mod config;
pub mod coverage;
pub mod diagnostics_trace;
pub mod error;
pub mod format;
pub mod live_progress;
pub mod logging;
pub mod run;
pub mod streaming;
pub mod test_model;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod run_test;
#[cfg(test)]
mod streaming_test;

pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
