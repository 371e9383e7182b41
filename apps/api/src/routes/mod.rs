pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;
use crate::ui;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Page
        .route("/", get(ui::handle_index))
        .route("/generate", post(ui::handle_generate_form))
        .route("/download", get(ui::handle_download))
        // JSON API
        .route("/api/v1/cover-letters", post(handlers::handle_generate))
        .with_state(state)
}
