//! Outbound proxy configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the outbound HTTP client used by the proxy executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Hard bound on one outbound call, including the body read
    pub timeout_seconds: u64,
    /// Redirects followed before the call is treated as failed
    pub max_redirects: usize,
    /// User-Agent sent when the caller does not provide one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl ProxyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_redirects: 5,
            user_agent: None,
        }
    }
}
