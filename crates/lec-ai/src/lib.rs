//! # lec-ai
//!
//! Remote content generation for Lectern.
//!
//! A [`RemoteAiClient`] builds a two-message prompt, makes exactly one
//! chat-completion call through a [`ChatTransport`], parses the reply as
//! strict JSON, and repairs it field by field against the target entity.
//! Two transports are provided:
//! - [`DirectClient`]: calls an OpenAI-compatible endpoint with a bearer key
//! - [`ProxyClient`]: calls the Lectern relay, which holds the key server-side
//!
//! Nothing here retries. Callers that want a guaranteed result wrap these
//! calls with a local fallback.

pub mod chat;
pub mod client;
pub mod extract;
pub mod prompts;
pub mod repair;
pub mod transport;

mod error;
mod http;

pub use chat::{ChatMessage, ChatRole, SamplingParams};
pub use client::RemoteAiClient;
pub use error::AiError;
pub use extract::extract_json;
pub use transport::{AnyTransport, ChatTransport, DirectClient, ProxyClient};
