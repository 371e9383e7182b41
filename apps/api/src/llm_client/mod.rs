/// Completion Client — the single point of entry for all model calls.
///
/// ARCHITECTURAL RULE: no other module talks to a model endpoint directly.
/// Handlers and the pipeline only see the `CompletionClient` trait, held in
/// `AppState` as `Arc<dyn CompletionClient>`.
///
/// Calls are single-shot: no retry, no backoff, no streaming. A failure is
/// returned to the caller as a `CompletionError` and aborts the user action.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod anthropic;
pub mod bedrock;

pub use anthropic::AnthropicClient;
pub use bedrock::BedrockClient;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Remote error (status {status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request could not be encoded: {0}")]
    InvalidRequest(String),

    #[error("Model returned empty content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt payload
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

/// Role-tagged message list sent to the model. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPayload {
    pub messages: Vec<PromptMessage>,
}

impl PromptPayload {
    /// All system messages, joined. Anthropic-style APIs take these out of band.
    pub fn system(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }

    /// Conversation messages, in order, without the system messages.
    pub fn conversation(&self) -> impl Iterator<Item = &PromptMessage> {
        self.messages.iter().filter(|m| m.role != Role::System)
    }
}

/// Fixed sampling parameters for every completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: 0.1,
            top_p: 1.0,
        }
    }
}

/// One complete model response.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model identifier, for logs.
    fn model(&self) -> &str;

    async fn complete(
        &self,
        payload: &PromptPayload,
        params: &GenerationParams,
    ) -> Result<Completion, CompletionError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Anthropic messages wire format (shared by the direct API and Bedrock)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anthropic_version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage<'a> {
    pub role: Role,
    pub content: &'a str,
}

impl<'a> MessagesRequest<'a> {
    pub fn new(payload: &'a PromptPayload, params: &GenerationParams) -> Self {
        Self {
            anthropic_version: None,
            model: None,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
            system: payload.system(),
            messages: payload
                .conversation()
                .map(|m| WireMessage {
                    role: m.role,
                    content: &m.content,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

/// Parses a messages-API response body into a `Completion`.
/// All text blocks are concatenated in order.
pub(crate) fn parse_completion(body: &[u8]) -> Result<Completion, CompletionError> {
    let response: MessagesResponse = serde_json::from_slice(body)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

    let text: String = response
        .content
        .iter()
        .filter(|b| b.block_type == "text")
        .filter_map(|b| b.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        return Err(CompletionError::EmptyContent);
    }

    Ok(Completion {
        text,
        input_tokens: response.usage.input_tokens,
        output_tokens: response.usage.output_tokens,
    })
}
