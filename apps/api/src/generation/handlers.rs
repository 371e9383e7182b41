//! Axum route handlers for the JSON Generation API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub job_requirements: String,
}

#[derive(Debug, Serialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub id: Uuid,
    pub text: String,
    pub generated_at: DateTime<Utc>,
    pub page_count: usize,
    pub line_count: usize,
    pub download_url: &'static str,
    pub usage: TokenUsage,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover-letters
///
/// Same action as the page form. Unlike the page, empty input is reported as
/// a validation error since an API caller expects a body back.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let letter = state
        .service
        .generate(&request.job_requirements)
        .await?
        .ok_or_else(|| AppError::Validation("job_requirements cannot be empty".to_string()))?;

    Ok(Json(GenerateResponse {
        id: letter.id,
        text: letter.text,
        generated_at: letter.generated_at,
        page_count: letter.document.page_count,
        line_count: letter.document.row_count,
        download_url: "/download",
        usage: TokenUsage {
            input_tokens: letter.input_tokens,
            output_tokens: letter.output_tokens,
        },
    }))
}
