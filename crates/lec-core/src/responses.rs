//! Response envelopes returned by the facade and printed by `lectern`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::GenerationState;

/// Generated content paired with the route the facade took to produce it.
///
/// `fallback_reason` carries the discarded remote error, if any. It is a
/// diagnostic for logs and tooling; callers that only want content read
/// `content`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GenerationReport<T> {
    pub content: T,
    pub route: Vec<GenerationState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl<T> GenerationReport<T> {
    /// Whether the remote attempt was made and failed.
    #[must_use]
    pub fn fell_back(&self) -> bool {
        self.route.contains(&GenerationState::AttemptingRemote)
            && self.route.contains(&GenerationState::FallingBackLocal)
    }
}

/// Response from `lectern topics`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TopicsResponse {
    pub subject: String,
    pub topics: Vec<String>,
    pub materials: Vec<String>,
}
