//! Refresharr - Jellyfin library refresh trigger
//!
//! Runs at the tail of a media import pipeline: waits for file writes to
//! settle, then asks Jellyfin to rescan its libraries. The exit code reports
//! the outcome (0 = refresh confirmed, 1 = skipped or failed) so hooks can
//! chain on it.

mod cli;
mod config;
mod services;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::CliOptions;
use crate::config::Config;
use crate::services::jellyfin::{JellyfinClient, JellyfinConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "refresharr=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!(?config, "Configuration loaded");

    let options = CliOptions::from_args();

    let mut jellyfin_config = JellyfinConfig::from_config(&config);
    if let Some(delay) = options.delay_override {
        jellyfin_config.refresh_delay = delay;
    }
    let client = JellyfinClient::new(jellyfin_config);

    let ok = if options.check_only {
        client.check_connection().await
    } else {
        client.refresh_library().await
    };

    std::process::exit(if ok { 0 } else { 1 });
}
