//! AWS Bedrock backend (default). Sends the Anthropic messages body through
//! `InvokeModel`; region, credential profile and model id come from config.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use tracing::{debug, warn};

use super::{
    parse_completion, Completion, CompletionClient, CompletionError, GenerationParams,
    MessagesRequest, PromptPayload,
};

/// Version tag Bedrock requires in Anthropic request bodies.
const BEDROCK_ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

#[derive(Clone)]
pub struct BedrockClient {
    client: Client,
    model_id: String,
}

impl BedrockClient {
    /// Resolves credentials from the named profile in the hosting environment.
    pub async fn from_profile(region: &str, profile: &str, model_id: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .profile_name(profile)
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
            model_id: model_id.to_string(),
        }
    }
}

#[async_trait]
impl CompletionClient for BedrockClient {
    fn model(&self) -> &str {
        &self.model_id
    }

    async fn complete(
        &self,
        payload: &PromptPayload,
        params: &GenerationParams,
    ) -> Result<Completion, CompletionError> {
        let body = encode_request(payload, params)?;

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(classify_sdk_error)?;

        let completion = parse_completion(output.body().as_ref())?;
        debug!(
            "Bedrock call succeeded: input_tokens={}, output_tokens={}",
            completion.input_tokens, completion.output_tokens
        );
        Ok(completion)
    }
}

fn encode_request(
    payload: &PromptPayload,
    params: &GenerationParams,
) -> Result<Vec<u8>, CompletionError> {
    let mut request = MessagesRequest::new(payload, params);
    request.anthropic_version = Some(BEDROCK_ANTHROPIC_VERSION);
    serde_json::to_vec(&request).map_err(|e| CompletionError::InvalidRequest(e.to_string()))
}

fn classify_sdk_error(err: SdkError<InvokeModelError>) -> CompletionError {
    let detail = DisplayErrorContext(&err).to_string();
    warn!("Bedrock InvokeModel failed: {detail}");

    match &err {
        SdkError::ServiceError(service) => {
            let status = service.raw().status().as_u16();
            if service.err().is_access_denied_exception() || status == 401 || status == 403 {
                CompletionError::Auth(detail)
            } else {
                CompletionError::Remote {
                    status,
                    message: detail,
                }
            }
        }
        SdkError::ResponseError(_) => CompletionError::MalformedResponse(detail),
        _ => CompletionError::Transport(detail),
    }
}
