//! Chat-completion wire types.
//!
//! The direct transport posts [`ChatRequest`]; the relay transport posts
//! [`ProxyRequest`] and lets the relay fill in the model and sampling
//! parameters. Both read back a [`ChatCompletionResponse`].

use serde::{Deserialize, Serialize};

use crate::error::AiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Fixed sampling parameters. Callers pick one of the constants; the values
/// are not exposed for tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl SamplingParams {
    pub const LESSON_PLAN: Self = Self {
        temperature: 0.7,
        max_tokens: 2000,
        top_p: 0.9,
        frequency_penalty: 0.1,
        presence_penalty: 0.1,
    };

    pub const ASSESSMENT: Self = Self {
        temperature: 0.7,
        max_tokens: 3000,
        top_p: 0.9,
        frequency_penalty: 0.1,
        presence_penalty: 0.1,
    };

    /// Lower temperature: insights should stay close to the numbers.
    pub const INSIGHTS: Self = Self {
        temperature: 0.5,
        max_tokens: 1500,
        top_p: 0.9,
        frequency_penalty: 0.1,
        presence_penalty: 0.1,
    };

    /// Applied by the relay, which does not know what kind of content is
    /// being requested.
    pub const RELAY_DEFAULT: Self = Self {
        temperature: 0.7,
        max_tokens: 3000,
        top_p: 0.9,
        frequency_penalty: 0.1,
        presence_penalty: 0.1,
    };
}

/// Body of a direct chat-completion call.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(flatten)]
    pub sampling: SamplingParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: ResponseFormatKind,
}

impl ResponseFormat {
    pub const JSON_OBJECT: Self = Self {
        kind: ResponseFormatKind::JsonObject,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormatKind {
    JsonObject,
    Text,
}

/// Body posted to the relay.
#[derive(Debug, Serialize)]
pub struct ProxyRequest<'a> {
    pub messages: &'a [ChatMessage],
    pub response_format: ResponseFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::EmptyResponse`] when there is no choice or its
    /// content is missing or blank.
    pub fn into_content(self) -> Result<String, AiError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AiError::EmptyResponse)
    }
}
