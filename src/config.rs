//! Runtime configuration.
//!
//! The display client keeps no persisted state; configuration is the feed
//! server's base URL, resolved from (highest precedence first) the
//! `--server` flag, the `BUSBOARD_SERVER_URL` environment variable, and
//! the built-in default.

use serde::Serialize;

use crate::constants::DEFAULT_SERVER_URL;

/// Configuration for the busboard client.
#[derive(Serialize, Clone, Debug)]
pub struct Config {
    /// Base URL of the feed server (`http://` or `https://`). The
    /// WebSocket endpoint and display-image URLs are derived from it.
    pub server_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

impl Config {
    /// Resolves configuration from defaults, environment, and an optional
    /// explicit server URL (the CLI flag).
    #[must_use]
    pub fn resolve(server_flag: Option<String>) -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        if let Some(server_url) = server_flag {
            config.server_url = server_url;
        }
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(server_url) = std::env::var("BUSBOARD_SERVER_URL") {
            self.server_url = server_url;
        }
    }
}
