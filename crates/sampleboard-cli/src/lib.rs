//! Sampleboard CLI support
//!
//! Demo data, terminal rendering, and the randomized lifecycle simulator
//! behind the `sampleboard` binary.

#![allow(missing_docs)]

pub mod render;
pub mod seed;
pub mod test_harness;

pub use test_harness::{run_simulator, SimulatorConfig, SimulatorReport, TestHarness};

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`, defaulting to `info`. Logs go to stderr so command
/// output on stdout stays clean.
pub fn init_tracing(json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
}
