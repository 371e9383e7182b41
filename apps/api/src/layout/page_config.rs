//! Page geometry for the output document.
//!
//! All lengths are millimetres measured from the top-left corner of the page,
//! the way a reader sees it. The renderer converts to PDF's bottom-left origin.

/// Points per millimetre (72pt per inch ÷ 25.4mm per inch).
const PT_PER_MM: f32 = 72.0 / 25.4;

/// Layout parameters for every page of the output document.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_top_mm: f32,
    /// Auto page-break margin: a row never extends into this band.
    pub margin_bottom_mm: f32,
    /// Every line occupies exactly one row of this height.
    pub row_height_mm: f32,
    pub font_size_pt: f32,
}

/// A4 portrait, 10mm left and top margins, 15mm break margin, 10mm rows, 12pt text.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_left_mm: 10.0,
        margin_top_mm: 10.0,
        margin_bottom_mm: 15.0,
        row_height_mm: 10.0,
        font_size_pt: 12.0,
    }
}

impl PageConfig {
    /// Number of whole rows that fit between the top margin and the break margin.
    /// Always at least one, so pagination makes progress on degenerate configs.
    pub fn rows_per_page(&self) -> usize {
        let usable = self.page_height_mm - self.margin_top_mm - self.margin_bottom_mm;
        ((usable / self.row_height_mm).floor() as usize).max(1)
    }

    /// Distance from the page top to the top edge of row `index`.
    pub fn row_top_mm(&self, index: usize) -> f32 {
        self.margin_top_mm + index as f32 * self.row_height_mm
    }

    /// Text baseline of row `index`, measured from the page bottom.
    /// Text is vertically centred in its row.
    pub fn baseline_from_bottom_mm(&self, index: usize) -> f32 {
        let font_mm = self.font_size_pt / PT_PER_MM;
        let baseline_from_top = self.row_top_mm(index) + self.row_height_mm / 2.0 + 0.3 * font_mm;
        self.page_height_mm - baseline_from_top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fits_27_rows() {
        assert_eq!(default_page_config().rows_per_page(), 27);
    }

    #[test]
    fn test_last_row_stays_above_break_margin() {
        let config = default_page_config();
        let last = config.rows_per_page() - 1;
        let bottom = config.row_top_mm(last) + config.row_height_mm;
        assert!(bottom <= config.page_height_mm - config.margin_bottom_mm);
    }

    #[test]
    fn test_baselines_descend_down_the_page() {
        let config = default_page_config();
        let first = config.baseline_from_bottom_mm(0);
        let second = config.baseline_from_bottom_mm(1);
        assert!(first < config.page_height_mm - config.margin_top_mm);
        assert!((first - second - config.row_height_mm).abs() < 1e-3);
    }

    #[test]
    fn test_tiny_page_still_holds_one_row() {
        let config = PageConfig {
            page_height_mm: 20.0,
            ..default_page_config()
        };
        assert_eq!(config.rows_per_page(), 1);
    }
}
