//! Configuration loaded from `flowscore.toml`.
//!
//! Keys missing from the file fall back to defaults. The
//! `FLOWSCORE_URL` environment variable takes precedence over the
//! configured endpoint.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::retry::RetryPolicy;

/// Default public scoring endpoint.
pub const DEFAULT_SCORE_URL: &str = "https://sableye.serviceslab.click/score";

/// Top-level configuration for the flowscore pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowscoreConfig {
    /// Scoring endpoint URL.
    #[serde(default = "default_score_url")]
    pub score_url: String,

    /// Attempts per row before a terminal failure badge.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Cap on simultaneously in-flight scoring requests.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Base backoff delay in milliseconds.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Random jitter added to each backoff, in milliseconds.
    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,

    /// Per-request timeout for the direct HTTP channel, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_score_url() -> String {
    DEFAULT_SCORE_URL.to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_max_concurrent() -> usize {
    3
}

fn default_base_delay_ms() -> u64 {
    600
}

fn default_jitter_ms() -> u64 {
    250
}

fn default_request_timeout_ms() -> u64 {
    9_000
}

impl Default for FlowscoreConfig {
    fn default() -> Self {
        Self {
            score_url: default_score_url(),
            max_attempts: default_max_attempts(),
            max_concurrent: default_max_concurrent(),
            base_delay_ms: default_base_delay_ms(),
            jitter_ms: default_jitter_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl FlowscoreConfig {
    /// Loads `flowscore.toml` from the current directory, falling back
    /// to defaults when the file does not exist, then applies the
    /// environment override.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(Path::new("flowscore.toml"))?;
        Ok(config.with_env_url(std::env::var("FLOWSCORE_URL").ok()))
    }

    /// Loads configuration from an explicit path; a missing file means
    /// defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Applies the `FLOWSCORE_URL` override when present and non-empty.
    pub fn with_env_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url
            && !url.is_empty()
        {
            self.score_url = url;
        }
        self
    }

    /// The retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay_ms: self.base_delay_ms,
            jitter_ms: self.jitter_ms,
            ..Default::default()
        }
    }

    /// The direct-channel request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
