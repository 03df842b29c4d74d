//! Tracing initialization for the `tiodb` binary.
//!
//! The library only emits `tracing` events and spans; installing a subscriber is the
//! embedding application's job. The filter is read from `RUST_LOG` (default `info`),
//! e.g. `RUST_LOG=tiodb=debug` to see every statement as it is issued.

use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install a console (fmt) subscriber on stderr, filtered by `RUST_LOG`.
pub fn init_telemetry() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        // stdout carries command output
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    info!("Telemetry initialized");
    Ok(())
}
