//! Chat transports: a direct chat-completion client and a client for the
//! credential-holding relay. Both send one request per call, with no retries.

use std::future::Future;
use std::time::Duration;

use lec_config::{AiConfig, AiTransport};
use tracing::debug;

use crate::chat::{ChatCompletionResponse, ChatMessage, ChatRequest, ProxyRequest, ResponseFormat, SamplingParams};
use crate::error::AiError;
use crate::http::check_response;

/// Sends a two-message chat payload and returns the model's raw reply text.
pub trait ChatTransport: Send + Sync {
    fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: &SamplingParams,
    ) -> impl Future<Output = Result<String, AiError>> + Send;
}

/// Calls an OpenAI-compatible `/chat/completions` endpoint with a bearer key.
#[derive(Debug, Clone)]
pub struct DirectClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    app_name: String,
    referer: Option<String>,
}

impl DirectClient {
    /// Build a client from the `[ai]` section.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NotConfigured`] when no API key is set, or
    /// [`AiError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::NotConfigured("ai.api_key is empty".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.completions_url(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            app_name: config.app_name.clone(),
            referer: config.referer.clone().filter(|r| !r.trim().is_empty()),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ChatTransport for DirectClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: &SamplingParams,
    ) -> Result<String, AiError> {
        debug!(url = %self.url, model = %self.model, "sending chat completion");
        let body = ChatRequest {
            model: &self.model,
            messages,
            sampling: *sampling,
        };

        let mut request = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("X-Title", &self.app_name)
            .json(&body);
        if let Some(referer) = &self.referer {
            request = request.header("HTTP-Referer", referer);
        }

        let resp = check_response(request.send().await?).await?;
        let completion: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| AiError::Parse(format!("completion envelope: {e}")))?;
        completion.into_content()
    }
}

/// Posts `{messages, response_format}` to the relay, which attaches the
/// credential, model, and sampling parameters before forwarding upstream.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    url: String,
}

impl ProxyClient {
    /// Build a client from the `[ai]` section.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::NotConfigured`] when no relay URL is set, or
    /// [`AiError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        if config.proxy_url.trim().is_empty() {
            return Err(AiError::NotConfigured("ai.proxy_url is empty".into()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            url: config.proxy_url.trim().to_string(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ChatTransport for ProxyClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        _sampling: &SamplingParams,
    ) -> Result<String, AiError> {
        debug!(url = %self.url, "sending chat completion through relay");
        let body = ProxyRequest {
            messages,
            response_format: ResponseFormat::JSON_OBJECT,
        };
        let resp = check_response(self.http.post(&self.url).json(&body).send().await?).await?;
        let completion: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| AiError::Parse(format!("completion envelope: {e}")))?;
        completion.into_content()
    }
}

/// The transport selected by `ai.transport`.
#[derive(Debug, Clone)]
pub enum AnyTransport {
    Direct(DirectClient),
    Proxy(ProxyClient),
}

impl AnyTransport {
    /// Build the transport named in the config.
    ///
    /// # Errors
    ///
    /// Propagates the chosen client's construction error.
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        match config.transport {
            AiTransport::Direct => DirectClient::new(config).map(Self::Direct),
            AiTransport::Proxy => ProxyClient::new(config).map(Self::Proxy),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> AiTransport {
        match self {
            Self::Direct(_) => AiTransport::Direct,
            Self::Proxy(_) => AiTransport::Proxy,
        }
    }
}

impl ChatTransport for AnyTransport {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        sampling: &SamplingParams,
    ) -> Result<String, AiError> {
        match self {
            Self::Direct(client) => client.complete(messages, sampling).await,
            Self::Proxy(client) => client.complete(messages, sampling).await,
        }
    }
}
