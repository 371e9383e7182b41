//! Browser-facing handlers: the page, the form action, and the PDF download.

pub mod page;

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Form,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;
use crate::ui::page::{render_page, PageView};

/// File name offered to the browser, independent of where the file is stored.
pub const DOWNLOAD_FILE_NAME: &str = "cover_letter.pdf";

#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub job_requirements: String,
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&PageView {
        max_chars: state.service.max_request_chars(),
        ..Default::default()
    }))
}

/// POST /generate
///
/// Empty input re-renders the page untouched. Failures are rendered into the
/// page with the input preserved so the user can retry.
pub async fn handle_generate_form(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Response {
    let mut view = PageView {
        job_requirements: &form.job_requirements,
        max_chars: state.service.max_request_chars(),
        ..Default::default()
    };

    match state.service.generate(&form.job_requirements).await {
        Ok(Some(letter)) => Html(render_page(&PageView {
            letter: Some(&letter.text),
            ..view
        }))
        .into_response(),
        Ok(None) => Html(render_page(&view)).into_response(),
        Err(err) => {
            err.log();
            let status = err.status_code();
            view.error = Some(err.user_message());
            (status, Html(render_page(&view))).into_response()
        }
    }
}

/// GET /download
pub async fn handle_download(State(state): State<AppState>) -> Result<Response, AppError> {
    let path = state.service.renderer().output_path();
    let pdf = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(
                "No cover letter has been generated yet".to_string(),
            ))
        }
        Err(e) => {
            warn!("Failed to read output document {}: {e}", path.display());
            return Err(AppError::Internal(
                anyhow::Error::new(e).context("reading output document"),
            ));
        }
    };

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
            ),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}
