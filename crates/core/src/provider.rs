//! Provider trait — the abstraction over the remote assistant call.
//!
//! The core only needs "send a string, get a string or a failure". A request
//! carries the model identifier, the output cap, and a single user message
//! holding the composed context. Transport and authentication belong to the
//! implementation (see `eduassist-providers`).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A request to the remote assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantRequest {
    /// The model to use (e.g., "claude-sonnet-4-20250514")
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// The conversation messages (one user message in practice)
    pub messages: Vec<RequestMessage>,
}

impl AssistantRequest {
    /// Build the single-message request the chat flow sends.
    pub fn single(model: impl Into<String>, max_tokens: u32, context: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            messages: vec![RequestMessage::user(context)],
        }
    }

    /// The text of the last user message, if any.
    pub fn prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
    }
}

/// One message inside an [`AssistantRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestMessage {
    pub role: String,
    pub content: String,
}

impl RequestMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The extracted assistant text. Never empty: providers report an
    /// empty payload as [`ProviderError::MissingText`].
    pub text: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,

    /// Token usage statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// The chat flow calls `complete()` exactly once per submission and treats
/// every error as "answer locally instead".
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(
        &self,
        request: AssistantRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError>;
}
