//! Application configuration management

use std::env;
use std::fmt;

use anyhow::Result;

/// Application configuration loaded from environment variables.
///
/// Missing or empty Jellyfin credentials are not an error: the refresh is
/// skipped at call time instead of aborting startup.
#[derive(Clone)]
pub struct Config {
    /// Jellyfin API token
    pub jellyfin_api_key: Option<String>,

    /// Jellyfin server address, e.g. `http://localhost:8096`
    pub jellyfin_base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            jellyfin_api_key: non_empty(env::var("JELLYFIN_API_KEY").ok()),
            jellyfin_base_url: non_empty(env::var("JELLYFIN_BASE_URL").ok()),
        })
    }
}

// Keep the API key out of debug output and logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "jellyfin_api_key",
                &self.jellyfin_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("jellyfin_base_url", &self.jellyfin_base_url)
            .finish()
    }
}

/// Treat empty environment values the same as unset ones.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
