use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::CompletionError;
use crate::render::RenderError;
use crate::source_document::DocumentReadError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Document read error: {0}")]
    DocumentRead(#[from] DocumentReadError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A generation is already in progress")]
    Busy,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message safe to show in the page. Never includes credentials or raw
    /// upstream bodies; those only go to the log.
    pub fn user_message(&self) -> String {
        match self {
            AppError::DocumentRead(_) => {
                "The resume document could not be loaded. Please contact the administrator."
                    .to_string()
            }
            AppError::Completion(CompletionError::Auth(_)) => {
                "The language model service rejected the request credentials. \
                 Please contact the administrator."
                    .to_string()
            }
            AppError::Completion(CompletionError::Transport(_)) => {
                "The language model service could not be reached. Please try again.".to_string()
            }
            AppError::Completion(_) => {
                "The language model service failed to produce a cover letter. Please try again."
                    .to_string()
            }
            AppError::Render(_) => {
                "The cover letter PDF could not be created. Please try again.".to_string()
            }
            AppError::Validation(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Busy => {
                "A cover letter is already being generated. Please wait for it to finish."
                    .to_string()
            }
            AppError::Internal(_) => "An internal error occurred. Please try again.".to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Busy => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Completion(_) => StatusCode::BAD_GATEWAY,
            AppError::DocumentRead(_) | AppError::Render(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::DocumentRead(_) => "DOCUMENT_READ_ERROR",
            AppError::Completion(_) => "COMPLETION_ERROR",
            AppError::Render(_) => "RENDER_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Busy => "GENERATION_IN_PROGRESS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Logs server-side failures with their full cause chain.
    pub fn log(&self) {
        match self {
            AppError::DocumentRead(e) => tracing::error!("Document read error: {e}"),
            AppError::Completion(e) => tracing::error!("Completion error: {e}"),
            AppError::Render(e) => tracing::error!("Render error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            AppError::Validation(_) | AppError::Busy | AppError::NotFound(_) => {}
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.user_message()
            }
        }));

        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Busy.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::Completion(CompletionError::EmptyContent).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::Render(RenderError::Encode("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_user_message_hides_upstream_detail() {
        let err = AppError::Completion(CompletionError::Auth("secret key sk-123 rejected".into()));
        let msg = err.user_message();
        assert!(msg.contains("credentials"));
        assert!(!msg.contains("sk-123"));
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let err = AppError::Validation("Job requirements are too long".into());
        assert_eq!(err.user_message(), "Job requirements are too long");
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = AppError::Busy.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "GENERATION_IN_PROGRESS");
    }
}
