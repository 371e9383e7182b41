//! Direct Anthropic Messages API backend (`LLM_PROVIDER=anthropic`).

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{
    parse_completion, Completion, CompletionClient, CompletionError, GenerationParams,
    MessagesRequest, PromptPayload,
};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, model: String) -> Result<Self, reqwest::Error> {
        Self::with_endpoint(api_key, model, ANTHROPIC_API_URL.to_string())
    }

    /// Same client pointed at a different messages endpoint (proxies, tests).
    pub fn with_endpoint(
        api_key: String,
        model: String,
        endpoint: String,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            model,
            endpoint,
        })
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        payload: &PromptPayload,
        params: &GenerationParams,
    ) -> Result<Completion, CompletionError> {
        let mut request_body = MessagesRequest::new(payload, params);
        request_body.model = Some(&self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        if !status.is_success() {
            let raw = String::from_utf8_lossy(&body).into_owned();
            // Prefer the API's own message when the body is a structured error
            let message = serde_json::from_str::<AnthropicError>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            warn!("Anthropic API returned {}: {}", status, message);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Auth(message),
                _ => CompletionError::Remote {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let completion = parse_completion(&body)?;
        debug!(
            "Anthropic call succeeded: input_tokens={}, output_tokens={}",
            completion.input_tokens, completion.output_tokens
        );
        Ok(completion)
    }
}
