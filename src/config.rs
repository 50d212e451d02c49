//! Runtime configuration.
//!
//! Settings are read from an optional YAML file; every key has a default, so
//! an absent file or a partial one is fine. Command-line flags override what
//! the file says.
//!
//! ```yaml
//! homepage_timeout_ms: 10000
//! article_timeout_ms: 5000
//! request_timeout_ms: 30000
//! discovery_cap: 10
//! visit_cap: 8
//! site_article_cap: 5
//! listen_addr: "127.0.0.1:5000"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Browser-like identification; many news sites block obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Timeout for the homepage fetch of a target site.
    pub homepage_timeout_ms: u64,
    /// Timeout for each individual article fetch.
    pub article_timeout_ms: u64,
    /// Overall budget for one `/api/news` request.
    pub request_timeout_ms: u64,
    /// Maximum candidate links collected on a homepage.
    pub discovery_cap: usize,
    /// Maximum candidates actually fetched; also the fetch concurrency.
    pub visit_cap: usize,
    /// Articles taken from each fixed site.
    pub site_article_cap: usize,
    pub user_agent: String,
    pub listen_addr: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            homepage_timeout_ms: 10_000,
            article_timeout_ms: 5_000,
            request_timeout_ms: 30_000,
            discovery_cap: 10,
            visit_cap: 8,
            site_article_cap: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            listen_addr: "127.0.0.1:5000".to_string(),
        }
    }
}

impl ScraperConfig {
    /// Load from `path`, or use defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                let config = Self::from_yaml(&content)?;
                info!(path = %path.display(), "Loaded configuration");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn homepage_timeout(&self) -> Duration {
        Duration::from_millis(self.homepage_timeout_ms)
    }

    pub fn article_timeout(&self) -> Duration {
        Duration::from_millis(self.article_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Visit cap never exceeds the discovery cap and is at least one.
    pub fn effective_visit_cap(&self) -> usize {
        self.visit_cap.min(self.discovery_cap).max(1)
    }
}
