use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::llm_client::GenerationParams;

const DEFAULT_SOURCE_DOCUMENT_PATH: &str = "cv/resume.pdf";
const DEFAULT_FONT_PATH: &str = "fonts/DejaVuSans.ttf";
const DEFAULT_OUTPUT_PATH: &str = "cover_letter.pdf";
const DEFAULT_AWS_REGION: &str = "eu-west-1";
const DEFAULT_AWS_PROFILE: &str = "default";
const DEFAULT_BEDROCK_MODEL_ID: &str = "eu.anthropic.claude-3-7-sonnet-20250219-v1:0";
const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-7-sonnet-20250219";
const DEFAULT_MAX_REQUEST_CHARS: usize = 20_000;

/// Which hosted model endpoint serves completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    /// AWS Bedrock `InvokeModel`, credentials resolved from the named profile.
    Bedrock {
        region: String,
        profile: String,
        model_id: String,
    },
    /// Anthropic Messages API called directly.
    Anthropic { api_key: String, model: String },
}

/// Application configuration loaded from environment variables.
/// Every field has a default except the Anthropic API key, which is only
/// required when that provider is selected.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub source_document_path: PathBuf,
    pub font_path: PathBuf,
    pub output_path: PathBuf,
    pub provider: LlmProvider,
    pub generation: GenerationParams,
    pub max_request_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let provider = match env_or("LLM_PROVIDER", "bedrock").to_lowercase().as_str() {
            "bedrock" => LlmProvider::Bedrock {
                region: env_or("AWS_REGION", DEFAULT_AWS_REGION),
                profile: env_or("AWS_PROFILE", DEFAULT_AWS_PROFILE),
                model_id: env_or("BEDROCK_MODEL_ID", DEFAULT_BEDROCK_MODEL_ID),
            },
            "anthropic" => LlmProvider::Anthropic {
                api_key: require_env("ANTHROPIC_API_KEY")?,
                model: env_or("ANTHROPIC_MODEL", DEFAULT_ANTHROPIC_MODEL),
            },
            other => bail!("LLM_PROVIDER must be 'bedrock' or 'anthropic', got '{other}'"),
        };

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            source_document_path: env_or("SOURCE_DOCUMENT_PATH", DEFAULT_SOURCE_DOCUMENT_PATH)
                .into(),
            font_path: env_or("FONT_PATH", DEFAULT_FONT_PATH).into(),
            output_path: env_or("OUTPUT_PATH", DEFAULT_OUTPUT_PATH).into(),
            provider,
            generation: GenerationParams::default(),
            max_request_chars: match std::env::var("MAX_REQUEST_CHARS") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("MAX_REQUEST_CHARS must be a positive integer")?,
                Err(_) => DEFAULT_MAX_REQUEST_CHARS,
            },
        })
    }
}

impl LlmProvider {
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Bedrock { .. } => "bedrock",
            LlmProvider::Anthropic { .. } => "anthropic",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            LlmProvider::Bedrock { model_id, .. } => model_id,
            LlmProvider::Anthropic { model, .. } => model,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
