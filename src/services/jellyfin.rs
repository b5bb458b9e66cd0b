//! Jellyfin API client for triggering library rescans
//!
//! Jellyfin rescans its media folders on `POST /Library/Refresh` and answers
//! a successful trigger with 204 No Content. The refresh is preceded by a
//! settle delay so the import pipeline can finish writing files first.

use std::fmt;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;

/// How long to wait before asking the server to rescan, giving the import
/// pipeline time to finish writing files.
pub const REFRESH_SETTLE_DELAY: Duration = Duration::from_secs(15);

/// Path Jellyfin exposes for triggering a full library rescan.
const LIBRARY_REFRESH_PATH: &str = "/Library/Refresh";

/// Unauthenticated endpoint with basic server identity, used as a probe.
const SYSTEM_INFO_PATH: &str = "/System/Info/Public";

/// Header Jellyfin (and Emby) accept the API token under.
const AUTH_HEADER: &str = "X-MediaBrowser-Token";

/// Configuration for the Jellyfin client.
///
/// Credentials are `None` when the integration is unconfigured; the client
/// then skips its calls instead of failing.
#[derive(Clone)]
pub struct JellyfinConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// Settle delay before the refresh request.
    pub refresh_delay: Duration,
}

impl JellyfinConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.jellyfin_base_url.clone(),
            api_key: config.jellyfin_api_key.clone(),
            refresh_delay: REFRESH_SETTLE_DELAY,
        }
    }
}

impl Default for JellyfinConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            refresh_delay: REFRESH_SETTLE_DELAY,
        }
    }
}

// Keep the API key out of debug output and logs.
impl fmt::Debug for JellyfinConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JellyfinConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("refresh_delay", &self.refresh_delay)
            .finish()
    }
}

/// Failure modes of a refresh attempt. Configuration-missing is not an
/// error: it short-circuits before any request is built.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Jellyfin rejected the request: status {status}, response: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("failed to reach Jellyfin: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Public system info returned by `/System/Info/Public`.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicSystemInfo {
    #[serde(rename = "ServerName")]
    pub server_name: Option<String>,
    #[serde(rename = "Version")]
    pub version: Option<String>,
}

/// Jellyfin API client
pub struct JellyfinClient {
    client: Client,
    config: JellyfinConfig,
}

impl JellyfinClient {
    pub fn new(config: JellyfinConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Trigger a library refresh in Jellyfin.
    ///
    /// Returns `true` only when the server confirmed the trigger with
    /// 204 No Content. Every failure mode is logged and converted to
    /// `false`; nothing propagates to the caller.
    pub async fn refresh_library(&self) -> bool {
        let Some((base_url, api_key)) = self.credentials() else {
            info!("Jellyfin API key or base URL not set, skipping library refresh");
            return false;
        };
        let url = endpoint(base_url, LIBRARY_REFRESH_PATH);

        info!(
            delay_secs = self.config.refresh_delay.as_secs_f64(),
            "Waiting for import to settle before refreshing Jellyfin library"
        );
        tokio::time::sleep(self.config.refresh_delay).await;

        info!(url = %url, "Triggering Jellyfin library refresh");
        match self.try_refresh(&url, api_key).await {
            Ok(()) => {
                info!("Jellyfin library refresh triggered");
                true
            }
            Err(e) => {
                error!(error = %e, "Failed to refresh Jellyfin library");
                false
            }
        }
    }

    /// Probe the configured server without triggering a rescan.
    ///
    /// Same never-propagate contract as [`refresh_library`](Self::refresh_library),
    /// but with no settle delay.
    pub async fn check_connection(&self) -> bool {
        let Some((base_url, _)) = self.credentials() else {
            info!("Jellyfin API key or base URL not set, skipping connection check");
            return false;
        };
        let url = endpoint(base_url, SYSTEM_INFO_PATH);

        match self.fetch_system_info(&url).await {
            Ok(system_info) => {
                info!(
                    server = system_info.server_name.as_deref().unwrap_or("unknown"),
                    version = system_info.version.as_deref().unwrap_or("unknown"),
                    "Jellyfin is reachable"
                );
                true
            }
            Err(e) => {
                error!(error = %e, "Jellyfin connection check failed");
                false
            }
        }
    }

    /// Credentials present and non-empty. Nothing is attempted without both.
    fn credentials(&self) -> Option<(&str, &str)> {
        let base_url = self.config.base_url.as_deref().filter(|v| !v.is_empty())?;
        let api_key = self.config.api_key.as_deref().filter(|v| !v.is_empty())?;
        Some((base_url, api_key))
    }

    async fn try_refresh(&self, url: &str, api_key: &str) -> Result<(), RefreshError> {
        // Jellyfin expects an empty JSON POST here.
        let resp = self
            .client
            .post(url)
            .header(AUTH_HEADER, api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("")
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(RefreshError::Rejected { status, body })
    }

    async fn fetch_system_info(&self, url: &str) -> Result<PublicSystemInfo, RefreshError> {
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RefreshError::Rejected { status, body });
        }

        Ok(resp.json().await?)
    }
}

/// Join the refresh path onto the configured address without producing a
/// double slash when the address carries trailing ones.
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
