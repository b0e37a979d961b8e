//! Catalog table renderer.
//!
//! Renders the book list as a fixed-width four-column table (ID, TITLE,
//! AUTHOR, ADDED). Long titles and authors are truncated with an ellipsis so
//! rows stay aligned.

use crate::domain::BookRecord;

const ID_WIDTH: usize = 5;
const TITLE_WIDTH: usize = 34;
const AUTHOR_WIDTH: usize = 24;

/// Truncates `text` to `width`, appending "..." when it does not fit.
fn clip(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

/// Renders the column header row.
#[must_use]
pub fn render_header() -> String {
    format!(
        "{:>id$}  {:<title$}  {:<author$}  {}",
        "ID",
        "TITLE",
        "AUTHOR",
        "ADDED",
        id = ID_WIDTH,
        title = TITLE_WIDTH,
        author = AUTHOR_WIDTH,
    )
}

/// Renders a single book row.
#[must_use]
pub fn render_row(book: &BookRecord) -> String {
    format!(
        "{:>id$}  {:<title$}  {:<author$}  {}",
        book.id,
        clip(&book.title, TITLE_WIDTH),
        clip(&book.author, AUTHOR_WIDTH),
        book.created_on(),
        id = ID_WIDTH,
        title = TITLE_WIDTH,
        author = AUTHOR_WIDTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_align_with_the_header() {
        let book = BookRecord {
            id: 12,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            created_at: None,
        };
        let header = render_header();
        let row = render_row(&book);

        assert_eq!(
            header.find("AUTHOR"),
            row.find("Frank Herbert"),
            "author column should start where its header starts"
        );
        assert!(row.ends_with("n/a"));
    }

    #[test]
    fn long_titles_are_clipped() {
        let book = BookRecord {
            id: 1,
            title: "A".repeat(60),
            author: "B".to_string(),
            created_at: None,
        };
        let row = render_row(&book);
        assert!(row.contains("..."));
        assert!(!row.contains(&"A".repeat(40)));
    }
}
