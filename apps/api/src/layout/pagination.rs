//! Pagination — one row per newline-delimited line, new page when full.
//!
//! Rows never wrap. Line order and text are preserved exactly, apart from a
//! trailing `\r` left over from CRLF line endings.

use crate::layout::page_config::PageConfig;

/// One written line.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub text: String,
    /// Position of the row on its page (0 = first row below the top margin).
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageRows {
    pub rows: Vec<Row>,
}

/// Splits `text` into pages of rows. Always returns at least one page.
pub fn paginate(text: &str, config: &PageConfig) -> Vec<PageRows> {
    let per_page = config.rows_per_page();
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    lines
        .chunks(per_page)
        .map(|chunk| PageRows {
            rows: chunk
                .iter()
                .enumerate()
                .map(|(index, line)| Row {
                    text: (*line).to_string(),
                    index,
                })
                .collect(),
        })
        .collect()
}

/// Total rows across all pages.
pub fn row_count(pages: &[PageRows]) -> usize {
    pages.iter().map(|p| p.rows.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::default_page_config;

    fn all_text(pages: &[PageRows]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.rows.iter().map(|r| r.text.clone()))
            .collect()
    }

    #[test]
    fn test_one_row_per_line_in_order() {
        let text = "Dear Hiring Manager,\n\nI am applying for the role.\nSincerely,\nJane";
        let pages = paginate(text, &default_page_config());

        assert_eq!(pages.len(), 1);
        assert_eq!(
            all_text(&pages),
            vec![
                "Dear Hiring Manager,",
                "",
                "I am applying for the role.",
                "Sincerely,",
                "Jane"
            ]
        );
        let indices: Vec<usize> = pages[0].rows.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_page_break_after_full_page() {
        let config = default_page_config();
        let per_page = config.rows_per_page();
        let text: Vec<String> = (0..per_page + 3).map(|i| format!("line {i}")).collect();
        let pages = paginate(&text.join("\n"), &config);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].rows.len(), per_page);
        assert_eq!(pages[1].rows.len(), 3);
        assert_eq!(pages[1].rows[0].text, format!("line {per_page}"));
        assert_eq!(pages[1].rows[0].index, 0);
        assert_eq!(row_count(&pages), per_page + 3);
    }

    #[test]
    fn test_exactly_full_page_does_not_add_blank_page() {
        let config = default_page_config();
        let text = vec!["x"; config.rows_per_page()].join("\n");
        assert_eq!(paginate(&text, &config).len(), 1);
    }

    #[test]
    fn test_non_ascii_text_is_preserved() {
        let text = "Zoë Łukasiewicz — naïve café\n日本語の履歴書\nΑθήνα 🚀";
        let pages = paginate(text, &default_page_config());
        assert_eq!(
            all_text(&pages),
            vec!["Zoë Łukasiewicz — naïve café", "日本語の履歴書", "Αθήνα 🚀"]
        );
    }

    #[test]
    fn test_crlf_line_endings() {
        let pages = paginate("first\r\nsecond\r\n", &default_page_config());
        assert_eq!(all_text(&pages), vec!["first", "second", ""]);
    }

    #[test]
    fn test_empty_text_gives_one_empty_row() {
        let pages = paginate("", &default_page_config());
        assert_eq!(pages.len(), 1);
        assert_eq!(all_text(&pages), vec![""]);
    }

    #[test]
    fn test_long_line_is_not_wrapped() {
        let long = "word ".repeat(200);
        let pages = paginate(&long, &default_page_config());
        assert_eq!(row_count(&pages), 1);
        assert_eq!(pages[0].rows[0].text, long);
    }
}
