//! Book domain model and the form draft used to compose one.
//!
//! This module defines the core [`BookRecord`] type mirroring a catalog entry
//! on the backend, and [`BookDraft`], the in-progress user input for creating
//! or editing a record. Records are server-owned: the client never invents an
//! id and never patches `created_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::{CatalogError, Result};

/// Server-assigned identifier of a book record.
pub type BookId = u64;

/// A catalog entry as served by the backend.
///
/// `id` and `created_at` are assigned by the server on creation and never
/// change; updates touch `title` and `author` only. `created_at` is absent
/// for legacy records that predate the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl BookRecord {
    /// Case-insensitive substring match against title OR author.
    ///
    /// `needle` must already be lowercased; the caller lowercases once per
    /// query instead of once per record.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.author.to_lowercase().contains(needle)
    }

    /// Returns the creation date formatted for display, or `"n/a"` for
    /// legacy records without one.
    ///
    /// # Examples
    ///
    /// ```
    /// use libroteca::domain::BookRecord;
    ///
    /// let record = BookRecord {
    ///     id: 1,
    ///     title: "Dune".to_string(),
    ///     author: "Herbert".to_string(),
    ///     created_at: None,
    /// };
    /// assert_eq!(record.created_on(), "n/a");
    /// ```
    #[must_use]
    pub fn created_on(&self) -> String {
        self.created_at
            .map_or_else(|| "n/a".to_string(), |ts| ts.format("%Y-%m-%d").to_string())
    }
}

/// In-progress form input for creating or editing a book.
///
/// `editing` holds the id of the record being edited, or `None` for
/// create-mode, so exactly one of the two modes holds at any time. Entering
/// edit-mode populates the draft from the selected record via [`BookDraft::load`];
/// cancel or a successful submit resets the draft back to create-mode blanks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub editing: Option<BookId>,
}

impl BookDraft {
    /// Populates a draft from an existing record, entering edit-mode.
    #[must_use]
    pub fn load(record: &BookRecord) -> Self {
        Self {
            title: record.title.clone(),
            author: record.author.clone(),
            editing: Some(record.id),
        }
    }

    /// Whether the draft targets an existing record.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Clears the draft back to create-mode blanks.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Checks that both fields carry non-blank text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Invalid`] naming the first empty field.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::Invalid("title must not be empty".to_string()));
        }
        if self.author.trim().is_empty() {
            return Err(CatalogError::Invalid("author must not be empty".to_string()));
        }
        Ok(())
    }
}
