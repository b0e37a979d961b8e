//! Mode types for the interaction state machine.
//!
//! This module defines the small enums that describe what the user is
//! currently doing with the form and how a notice should be presented. The
//! form operates in exactly one of two modes at a time, derived from the
//! draft's edit target rather than tracked separately, so the two can never
//! disagree.

use crate::domain::BookId;

/// Current mode of the book form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Composing a brand-new record.
    Create,

    /// Editing the existing record with this id.
    Edit(BookId),
}

/// Presentation class of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// An operation completed as requested.
    Success,

    /// An operation was rejected or failed.
    Error,
}
