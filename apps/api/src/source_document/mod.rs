//! Source Document Loader — the resume whose text is embedded in every prompt.
//!
//! The text is extracted once per process and held for its lifetime. `main`
//! forces the extraction before the listener binds, so a missing or unreadable
//! resume stops the service at startup instead of on the first request.

use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::info;

/// Form-feed emitted by the PDF extractor between pages.
const PAGE_BREAK: char = '\u{000C}';

#[derive(Debug, Error)]
pub enum DocumentReadError {
    #[error("Source document not found: '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("Source document '{}' could not be read: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Text extraction failed for '{}': {detail}", path.display())]
    Extraction { path: PathBuf, detail: String },

    #[error("Source document '{}' contains no extractable text", path.display())]
    Empty { path: PathBuf },
}

/// Turns a document on disk into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, DocumentReadError>;
}

/// PDF extraction via `pdf-extract`.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, DocumentReadError> {
        pdf_extract::extract_text(path).map_err(|e| DocumentReadError::Extraction {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }
}

/// `.txt` / `.md` resumes, read as UTF-8.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, DocumentReadError> {
        std::fs::read_to_string(path).map_err(|source| DocumentReadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// The fixed resume document and its lazily extracted text.
pub struct SourceDocument {
    path: PathBuf,
    extractor: Box<dyn TextExtractor>,
    text: OnceCell<String>,
}

impl SourceDocument {
    /// Picks an extractor from the file extension. Anything that is not
    /// `.txt` or `.md` is treated as a PDF.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extractor: Box<dyn TextExtractor> = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("txt") | Some("md") => Box::new(PlainTextExtractor),
            _ => Box::new(PdfTextExtractor),
        };
        Self::with_extractor(path, extractor)
    }

    pub fn with_extractor(path: impl Into<PathBuf>, extractor: Box<dyn TextExtractor>) -> Self {
        Self {
            path: path.into(),
            extractor,
            text: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the document text, extracting it on first access.
    ///
    /// A failed extraction is not cached; the next call tries again.
    pub fn text(&self) -> Result<&str, DocumentReadError> {
        self.text
            .get_or_try_init(|| self.load())
            .map(String::as_str)
    }

    fn load(&self) -> Result<String, DocumentReadError> {
        match std::fs::metadata(&self.path) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DocumentReadError::NotFound {
                    path: self.path.clone(),
                })
            }
            Err(source) => {
                return Err(DocumentReadError::Unreadable {
                    path: self.path.clone(),
                    source,
                })
            }
        }

        let raw = self.extractor.extract(&self.path)?;
        let text = normalize_pages(&raw);
        if text.trim().is_empty() {
            return Err(DocumentReadError::Empty {
                path: self.path.clone(),
            });
        }

        info!(
            "Source document loaded from {} ({} chars)",
            self.path.display(),
            text.chars().count()
        );
        Ok(text)
    }
}

/// Page separators become plain newlines so pages read as one continuous text.
fn normalize_pages(raw: &str) -> String {
    raw.replace(PAGE_BREAK, "\n")
}
