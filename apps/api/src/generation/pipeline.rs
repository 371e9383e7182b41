//! Cover-letter pipeline — orchestrates one generation per user action.
//!
//! Flow: validate request → single-flight guard → cached resume text →
//!       compose prompt → completion → render PDF → return.
//!
//! No partial success: a completion failure never reaches the renderer, and a
//! render failure discards the generated text.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::composer::compose_prompt;
use crate::generation::request::UserRequest;
use crate::llm_client::{CompletionClient, GenerationParams};
use crate::render::{PdfRenderer, RenderedDocument};
use crate::source_document::SourceDocument;

/// Result of one successful generation.
#[derive(Debug, Clone)]
pub struct CoverLetter {
    pub id: Uuid,
    pub text: String,
    pub generated_at: DateTime<Utc>,
    pub document: RenderedDocument,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

pub struct CoverLetterService {
    document: Arc<SourceDocument>,
    llm: Arc<dyn CompletionClient>,
    renderer: PdfRenderer,
    params: GenerationParams,
    max_request_chars: usize,
    /// Held for the whole pipeline; a second action fails fast instead of queueing.
    in_flight: Mutex<()>,
}

impl CoverLetterService {
    pub fn new(
        document: Arc<SourceDocument>,
        llm: Arc<dyn CompletionClient>,
        renderer: PdfRenderer,
        params: GenerationParams,
        max_request_chars: usize,
    ) -> Self {
        Self {
            document,
            llm,
            renderer,
            params,
            max_request_chars,
            in_flight: Mutex::new(()),
        }
    }

    pub fn renderer(&self) -> &PdfRenderer {
        &self.renderer
    }

    pub fn max_request_chars(&self) -> usize {
        self.max_request_chars
    }

    /// Runs the pipeline for `raw_request`.
    ///
    /// Returns `Ok(None)` without contacting the model when the request is
    /// empty or whitespace-only.
    pub async fn generate(&self, raw_request: &str) -> Result<Option<CoverLetter>, AppError> {
        let Some(request) = UserRequest::parse(raw_request, self.max_request_chars)? else {
            debug!("Empty job requirements, nothing to generate");
            return Ok(None);
        };

        let _guard = self.in_flight.try_lock().map_err(|_| AppError::Busy)?;

        let id = Uuid::new_v4();
        self.run(id, &request)
            .instrument(info_span!("generate_cover_letter", %id))
            .await
            .map(Some)
    }

    async fn run(&self, id: Uuid, request: &UserRequest) -> Result<CoverLetter, AppError> {
        let cv_text = self.document.text()?;
        let payload = compose_prompt(cv_text, request);

        info!(
            "Requesting completion from {} ({} request chars)",
            self.llm.model(),
            request.as_str().chars().count()
        );
        let completion = self.llm.complete(&payload, &self.params).await?;

        let document = self.renderer.render(&completion.text).await?;

        info!(
            "Cover letter ready: {} ({} pages, {} bytes, {} output tokens)",
            document.path.display(),
            document.page_count,
            document.bytes.len(),
            completion.output_tokens
        );

        Ok(CoverLetter {
            id,
            text: completion.text,
            generated_at: Utc::now(),
            document,
            input_tokens: completion.input_tokens,
            output_tokens: completion.output_tokens,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::layout::default_page_config;
    use crate::llm_client::{Completion, CompletionError, PromptPayload};
    use crate::render::tests::bundled_font;
    use crate::render::RenderError;
    use async_trait::async_trait;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    /// Scripted completion backend that records every payload it receives.
    pub(crate) struct ScriptedClient {
        pub calls: AtomicUsize,
        pub seen: StdMutex<Vec<PromptPayload>>,
        pub reply: Result<String, fn() -> CompletionError>,
    }

    impl ScriptedClient {
        pub fn replying(text: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen: StdMutex::new(Vec::new()),
                reply: Ok(text.to_string()),
            }
        }

        pub fn failing(err: fn() -> CompletionError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen: StdMutex::new(Vec::new()),
                reply: Err(err),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        fn model(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            payload: &PromptPayload,
            _params: &GenerationParams,
        ) -> Result<Completion, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(payload.clone());
            match &self.reply {
                Ok(text) => Ok(Completion {
                    text: text.clone(),
                    input_tokens: 100,
                    output_tokens: 50,
                }),
                Err(make) => Err(make()),
            }
        }
    }

    pub(crate) fn service_in(
        dir: &Path,
        client: Arc<ScriptedClient>,
        font: PathBuf,
    ) -> CoverLetterService {
        let resume = dir.join("resume.txt");
        std::fs::write(&resume, "Jane Doe\nRust engineer").unwrap();
        CoverLetterService::new(
            Arc::new(SourceDocument::open(resume)),
            client,
            PdfRenderer::new(font, dir.join("cover_letter.pdf"), default_page_config()),
            GenerationParams::default(),
            1_000,
        )
    }

    #[tokio::test]
    async fn test_blank_request_never_calls_model() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(ScriptedClient::replying("unused"));
        let service = service_in(dir.path(), client.clone(), dir.path().join("font.ttf"));

        assert!(service.generate("").await.unwrap().is_none());
        assert!(service.generate("   \n\t").await.unwrap().is_none());
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_completion_failure_leaves_no_document() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(ScriptedClient::failing(|| {
            CompletionError::Transport("operation timed out".into())
        }));
        let service = service_in(dir.path(), client.clone(), dir.path().join("font.ttf"));

        let err = service.generate("Rust engineer").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Completion(CompletionError::Transport(_))
        ));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert!(!dir.path().join("cover_letter.pdf").exists());
    }

    #[tokio::test]
    async fn test_completion_failure_keeps_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cover_letter.pdf");
        std::fs::write(&output, b"previous letter").unwrap();
        let client = Arc::new(ScriptedClient::failing(|| {
            CompletionError::Auth("expired token".into())
        }));
        let service = service_in(dir.path(), client, dir.path().join("font.ttf"));

        assert!(service.generate("Rust engineer").await.is_err());
        assert_eq!(std::fs::read(&output).unwrap(), b"previous letter");
    }

    #[tokio::test]
    async fn test_missing_font_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(ScriptedClient::replying("Dear team,\nHello"));
        let service = service_in(dir.path(), client, dir.path().join("missing.ttf"));

        let err = service.generate("Rust engineer").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Render(RenderError::FontMissing { .. })
        ));
    }

    #[tokio::test]
    async fn test_prompt_embeds_resume_and_request() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(ScriptedClient::replying("Dear team"));
        let service = service_in(dir.path(), client.clone(), dir.path().join("missing.ttf"));

        let _ = service.generate("Staff engineer, Tokio").await;

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let user = &seen[0].messages[1].content;
        assert!(user.contains("Staff engineer, Tokio"));
        assert!(user.contains("Jane Doe\nRust engineer"));
    }

    #[tokio::test]
    async fn test_concurrent_generation_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(ScriptedClient::replying("unused"));
        let service = service_in(dir.path(), client.clone(), dir.path().join("font.ttf"));

        let _held = service.in_flight.try_lock().unwrap();
        assert!(matches!(
            service.generate("Rust engineer").await,
            Err(AppError::Busy)
        ));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_too_long_request_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(ScriptedClient::replying("unused"));
        let service = service_in(dir.path(), client.clone(), dir.path().join("font.ttf"));

        let long = "a".repeat(service.max_request_chars() + 1);
        assert!(matches!(
            service.generate(&long).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_successful_generation_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let client = Arc::new(ScriptedClient::replying("Dear team,\n\nRegards,\nJane"));
        let service = service_in(dir.path(), client, bundled_font());

        let letter = service.generate("Rust engineer").await.unwrap().unwrap();
        assert_eq!(letter.text, "Dear team,\n\nRegards,\nJane");
        assert_eq!(letter.document.row_count, 4);
        assert_eq!(letter.document.page_count, 1);
        assert!(dir.path().join("cover_letter.pdf").is_file());
    }
}
