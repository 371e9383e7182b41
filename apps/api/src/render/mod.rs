//! Output Renderer — turns generated text into the downloadable PDF.
//!
//! Flow: read font → paginate → encode (embedded TTF) → write to a temp file
//! beside the destination → atomic rename over the output path.
//! Nothing touches the output path until the whole document is encoded.

use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use crate::layout::pagination::row_count;
use crate::layout::{paginate, PageConfig};

pub mod pdf;

/// Title written into the PDF metadata.
const DOCUMENT_TITLE: &str = "Cover Letter";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Font file not found: '{}'", path.display())]
    FontMissing { path: PathBuf },

    #[error("Failed to read font file '{}': {source}", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Font could not be embedded: {0}")]
    FontInvalid(String),

    #[error("PDF encoding failed: {0}")]
    Encode(String),

    #[error("Failed to write output document '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Render task failed: {0}")]
    Task(String),
}

/// A written output document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub path: PathBuf,
    pub bytes: Bytes,
    pub page_count: usize,
    pub row_count: usize,
}

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    font_path: PathBuf,
    output_path: PathBuf,
    page: PageConfig,
}

impl PdfRenderer {
    pub fn new(font_path: PathBuf, output_path: PathBuf, page: PageConfig) -> Self {
        Self {
            font_path,
            output_path,
            page,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Renders on the blocking pool; see [`PdfRenderer::render_blocking`].
    pub async fn render(&self, text: &str) -> Result<RenderedDocument, RenderError> {
        let renderer = self.clone();
        let text = text.to_string();
        tokio::task::spawn_blocking(move || renderer.render_blocking(&text))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }

    pub fn render_blocking(&self, text: &str) -> Result<RenderedDocument, RenderError> {
        let font_bytes = std::fs::read(&self.font_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RenderError::FontMissing {
                path: self.font_path.clone(),
            },
            _ => RenderError::FontRead {
                path: self.font_path.clone(),
                source: e,
            },
        })?;

        let pages = paginate(text, &self.page);
        let rows = row_count(&pages);
        let pdf = pdf::encode_pdf(&pages, &font_bytes, &self.page, DOCUMENT_TITLE)?;

        write_atomically(&self.output_path, &pdf)?;
        info!(
            "Output document written to {} ({} pages, {} rows, {} bytes)",
            self.output_path.display(),
            pages.len(),
            rows,
            pdf.len()
        );

        Ok(RenderedDocument {
            path: self.output_path.clone(),
            bytes: Bytes::from(pdf),
            page_count: pages.len(),
            row_count: rows,
        })
    }
}

/// Writes through a temp file in the destination directory, then renames it
/// into place. A failure leaves any previous file at `path` untouched.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), RenderError> {
    let write_err = |source: std::io::Error| RenderError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
