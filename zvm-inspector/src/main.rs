//! zvm-inspector - periodic z/VM guest inspection
//!
//! Loads the configuration, builds the configured inspector and emits one
//! JSON line per guest sample on stdout:
//! - every `poller.interval_secs` until Ctrl-C
//! - or a single pass with `--once`

use anyhow::{Context, Result};
use std::io::Write;
use tokio::time::interval;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use zvm_inspector::config::InspectorConfig;
use zvm_inspector::poller::{GuestSample, Poller};
use zvm_inspector::InspectorFactory;

fn emit(samples: &[GuestSample]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for sample in samples {
        let line = serde_json::to_string(sample).context("Failed to serialize guest sample")?;
        writeln!(out, "{}", line).context("Failed to write guest sample")?;
    }
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zvm_inspector=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let once = std::env::args().skip(1).any(|arg| arg == "--once");

    let config = InspectorConfig::load().await.context("Failed to load configuration")?;
    info!(
        "zvm-inspector v{} starting: {} guests, backend {:?}",
        env!("CARGO_PKG_VERSION"),
        config.poller.guests.len(),
        config.inspector.backend
    );

    let inspector = InspectorFactory::create(&config);
    let poller = Poller::new(inspector, config.poller.guests.clone());

    if once {
        return emit(&poller.poll_once().await);
    }

    let mut timer = interval(config.poll_interval());
    loop {
        tokio::select! {
            _ = timer.tick() => {
                let samples = poller.poll_once().await;
                if let Err(e) = emit(&samples) {
                    error!("Failed to emit samples: {:#}", e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}
