//! Remote AI configuration.
//!
//! `enabled` is the "use real AI" flag. It is read once when the facade is
//! built and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1".to_string()
}

fn default_model() -> String {
    "openai/gpt-4o-mini".to_string()
}

fn default_proxy_url() -> String {
    "http://127.0.0.1:8787/api/openai-proxy".to_string()
}

fn default_app_name() -> String {
    "Lectern".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

/// How chat-completion requests leave the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AiTransport {
    /// Call the provider directly with `api_key`.
    #[default]
    Direct,
    /// Call a relay at `proxy_url`, which attaches the credential itself.
    Proxy,
}

impl fmt::Display for AiTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Direct => "direct",
            Self::Proxy => "proxy",
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiConfig {
    /// Attempt remote generation before falling back to local templates.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub transport: AiTransport,

    /// Provider API key (direct transport only).
    #[serde(default)]
    pub api_key: String,

    /// OpenAI-compatible API base URL; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Relay endpoint (proxy transport only).
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sent as `X-Title`.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Sent as `HTTP-Referer` when set.
    #[serde(default)]
    pub referer: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            transport: AiTransport::default(),
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            proxy_url: default_proxy_url(),
            timeout_secs: default_timeout_secs(),
            app_name: default_app_name(),
            referer: None,
        }
    }
}

impl AiConfig {
    /// Check if remote generation is enabled and the active transport has
    /// what it needs to send a request.
    pub fn is_configured(&self) -> bool {
        self.enabled
            && match self.transport {
                AiTransport::Direct => !self.api_key.is_empty() && !self.base_url.is_empty(),
                AiTransport::Proxy => !self.proxy_url.is_empty(),
            }
    }

    /// Full chat-completions URL for the direct transport.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
