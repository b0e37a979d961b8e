//! Plain-text rendering for the terminal shell.
//!
//! Rendering functions take snapshots of state and return `String`s; the
//! binary decides when to print them. Keeping this layer string-in/string-out
//! makes it testable and keeps all I/O in the shell.
//!
//! Visual design is deliberately minimal (no colors, no box drawing): the
//! client's job is the catalog and the session, not the styling.

pub mod table;

use crate::app::{Notice, NoticeKind};
use crate::domain::BookRecord;

/// Renders the full catalog view: count line plus table, or an empty-state
/// message.
///
/// `total` is the size of the unfiltered cache, used to phrase the count line
/// when a search query is active.
#[must_use]
pub fn render_catalog(visible: &[&BookRecord], total: usize, query: &str) -> String {
    if visible.is_empty() {
        return if query.trim().is_empty() {
            "No books in the catalog yet.".to_string()
        } else {
            format!("No books match \"{}\".", query.trim())
        };
    }

    let mut out = String::new();
    if query.trim().is_empty() {
        out.push_str(&format!("{} book(s)\n", visible.len()));
    } else {
        out.push_str(&format!("{} book(s) (filtered from {total})\n", visible.len()));
    }
    out.push_str(&table::render_header());
    for book in visible {
        out.push('\n');
        out.push_str(&table::render_row(book));
    }
    out
}

/// Renders a transient notice with its kind marker.
#[must_use]
pub fn render_notice(notice: &Notice) -> String {
    match notice.kind() {
        NoticeKind::Success => format!("[ok] {}", notice.message()),
        NoticeKind::Error => format!("[error] {}", notice.message()),
    }
}
