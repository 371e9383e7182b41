mod config;
mod errors;
mod generation;
mod layout;
mod llm_client;
mod render;
mod routes;
mod source_document;
mod state;
mod ui;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LlmProvider};
use crate::generation::pipeline::CoverLetterService;
use crate::layout::default_page_config;
use crate::llm_client::{AnthropicClient, BedrockClient, CompletionClient};
use crate::render::PdfRenderer;
use crate::routes::build_router;
use crate::source_document::SourceDocument;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on invalid values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting covergen v{}", env!("CARGO_PKG_VERSION"));

    // Load the resume once; without it no prompt can be built
    let document = Arc::new(SourceDocument::open(&config.source_document_path));
    document.text().with_context(|| {
        format!(
            "Failed to load source document '{}'",
            document.path().display()
        )
    })?;

    // Initialize completion client
    let llm = build_completion_client(&config).await?;
    info!(
        "Completion client initialized (provider: {}, model: {})",
        config.provider.name(),
        config.provider.model()
    );

    if !config.font_path.is_file() {
        warn!(
            "Font file {} not found; PDF rendering will fail until it is provided",
            config.font_path.display()
        );
    }
    let page_config = default_page_config();
    info!(
        "Output document: {} ({}x{}mm, {} rows per page)",
        config.output_path.display(),
        page_config.page_width_mm,
        page_config.page_height_mm,
        page_config.rows_per_page()
    );
    let renderer = PdfRenderer::new(
        config.font_path.clone(),
        config.output_path.clone(),
        page_config,
    );

    let state = AppState {
        service: Arc::new(CoverLetterService::new(
            document,
            llm,
            renderer,
            config.generation,
            config.max_request_chars,
        )),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_completion_client(config: &Config) -> Result<Arc<dyn CompletionClient>> {
    let client: Arc<dyn CompletionClient> = match &config.provider {
        LlmProvider::Bedrock {
            region,
            profile,
            model_id,
        } => Arc::new(BedrockClient::from_profile(region, profile, model_id).await),
        LlmProvider::Anthropic { api_key, model } => Arc::new(
            AnthropicClient::new(api_key.clone(), model.clone())
                .context("Failed to build HTTP client")?,
        ),
    };
    Ok(client)
}
