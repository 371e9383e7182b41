//! PDF encoding with an embedded TrueType font.
//!
//! CPU-bound; callers run it inside `tokio::task::spawn_blocking`.

use std::io::Cursor;

use printpdf::{Mm, PdfDocument};

use crate::layout::{PageConfig, PageRows};
use crate::render::RenderError;

const LAYER_NAME: &str = "Text";

/// Writes `pages` into a new PDF using `font_bytes` for every row.
///
/// Embedding the font (instead of a built-in base-14 font) is what lets rows
/// carry any character the font has a glyph for.
pub fn encode_pdf(
    pages: &[PageRows],
    font_bytes: &[u8],
    config: &PageConfig,
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    let width = Mm(config.page_width_mm);
    let height = Mm(config.page_height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);
    let font = doc
        .add_external_font(Cursor::new(font_bytes))
        .map_err(|e| RenderError::FontInvalid(e.to_string()))?;

    for (i, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if i == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for row in page.rows.iter().filter(|r| !r.text.is_empty()) {
            layer.use_text(
                row.text.as_str(),
                config.font_size_pt,
                Mm(config.margin_left_mm),
                Mm(config.baseline_from_bottom_mm(row.index)),
                &font,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| RenderError::Encode(e.to_string()))
}
