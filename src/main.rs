//! Watcher binary: load configuration, run until interrupted.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use webwatch::prelude::*;

/// Fixed configuration location, relative to the working directory.
const CONFIG_PATH: &str = "config/config.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = WatchConfig::load(CONFIG_PATH);
    let watcher = match UrlWatcherBuilder::from_config(config).build() {
        Ok(watcher) => watcher,
        Err(e) => {
            error!("{e}");
            return;
        }
    };

    info!(
        "Started: watching {} target(s), notifying {} webhook(s) every {}s",
        watcher.targets().len(),
        watcher.webhooks().len(),
        watcher.interval().as_secs()
    );

    watcher
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;
}
