//! Relay server configuration.
//!
//! The relay holds the upstream credential so that callers using the proxy
//! transport never see it.

use serde::{Deserialize, Serialize};

fn default_bind_addr() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_path() -> String {
    "/api/openai-proxy".to_string()
}

fn default_upstream_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Request path the relay answers on.
    #[serde(default = "default_path")]
    pub path: String,

    /// Upstream chat-completions endpoint.
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    /// Upstream API key, attached as a bearer token.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            path: default_path(),
            upstream_url: default_upstream_url(),
            api_key: String::new(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RelayConfig {
    /// Check if the relay can forward requests upstream.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.upstream_url.is_empty()
    }
}
