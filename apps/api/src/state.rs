use std::sync::Arc;

use crate::generation::pipeline::CoverLetterService;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Built once in `main` after the resume text has been loaded, then shared
/// read-only; the only mutable piece is the single-flight guard inside the service.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CoverLetterService>,
}
