//! Application state container.
//!
//! This module defines [`AppState`], the transient client-side state the
//! controller mutates: the authenticated session, the search query, the form
//! draft, the pending delete confirmation, the loading flag, and the current
//! transient notice. It is the single source of truth for everything the
//! shell renders besides the collection itself (which lives in
//! [`CollectionCache`](crate::remote::CollectionCache)).
//!
//! # Notices
//!
//! A [`Notice`] is a short human-readable message that expires
//! [`NOTICE_TTL`](crate::app::state::NOTICE_TTL) after it was posted. Posting
//! a new notice while one is pending replaces it, which resets the timer; the
//! client never stacks dismissals. Expiry is computed against a caller-passed
//! instant so tests control the clock.

use std::time::{Duration, Instant};

use crate::app::modes::{FormMode, NoticeKind};
use crate::domain::{BookDraft, BookId, Session};

/// How long a notice stays visible before auto-dismissing.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

/// A transient, auto-dismissing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    message: String,
    kind: NoticeKind,
    expires_at: Instant,
}

impl Notice {
    fn new(message: String, kind: NoticeKind, now: Instant) -> Self {
        Self {
            message,
            kind,
            expires_at: now + NOTICE_TTL,
        }
    }

    /// The text to show.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this is a success or an error notice.
    #[must_use]
    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    /// Whether the notice has outlived its 4-second display window.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Central client-side state container.
///
/// Mutated only by the controller (single writer); the shell reads it to
/// render. The collection mirror itself is kept separately in the remote
/// layer.
#[derive(Debug, Default)]
pub struct AppState {
    /// The authenticated identity, if logged in.
    pub session: Option<Session>,

    /// Current search query; filtering itself is pure and happens on demand.
    pub search_query: String,

    /// The form draft being composed (create-mode blanks by default).
    pub draft: BookDraft,

    /// Delete target awaiting explicit confirmation.
    pub pending_delete: Option<BookId>,

    /// Raised while a network operation is in progress.
    pub loading: bool,

    /// The currently pending notice, if any.
    notice: Option<Notice>,
}

impl AppState {
    /// Creates an empty, logged-out state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current form mode, derived from the draft's edit target.
    #[must_use]
    pub fn form_mode(&self) -> FormMode {
        match self.draft.editing {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }

    /// Posts a success notice, replacing (and re-timing) any pending one.
    pub fn notify_success(&mut self, message: impl Into<String>) {
        self.notify_at(message, NoticeKind::Success, Instant::now());
    }

    /// Posts an error notice, replacing (and re-timing) any pending one.
    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notify_at(message, NoticeKind::Error, Instant::now());
    }

    /// Posts a notice with an explicit clock, for tests.
    pub fn notify_at(&mut self, message: impl Into<String>, kind: NoticeKind, now: Instant) {
        let message = message.into();
        tracing::debug!(kind = ?kind, message = %message, "notice posted");
        self.notice = Some(Notice::new(message, kind, now));
    }

    /// The notice to display right now, or `None` once it has expired.
    #[must_use]
    pub fn current_notice(&self, now: Instant) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| !notice.is_expired(now))
    }

    /// Drops an expired notice so it is not kept around indefinitely.
    pub fn prune_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|notice| notice.is_expired(now)) {
            self.notice = None;
        }
    }

    /// Clears everything tied to the authenticated session.
    ///
    /// Used on logout and on forced logout: session, draft, search query and
    /// pending confirmation all reset together.
    pub fn reset_session_state(&mut self) {
        self.session = None;
        self.draft.reset();
        self.search_query.clear();
        self.pending_delete = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookRecord, Role};

    #[test]
    fn form_mode_follows_the_draft() {
        let mut state = AppState::new();
        assert_eq!(state.form_mode(), FormMode::Create);

        state.draft = BookDraft::load(&BookRecord {
            id: 4,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            created_at: None,
        });
        assert_eq!(state.form_mode(), FormMode::Edit(4));
    }

    #[test]
    fn notices_expire_after_the_ttl() {
        let mut state = AppState::new();
        let t0 = Instant::now();

        state.notify_at("saved", NoticeKind::Success, t0);
        assert!(state.current_notice(t0).is_some());
        assert!(state.current_notice(t0 + Duration::from_secs(3)).is_some());
        assert!(state.current_notice(t0 + NOTICE_TTL).is_none());

        state.prune_notice(t0 + NOTICE_TTL);
        assert!(state.current_notice(t0).is_none());
    }

    #[test]
    fn a_new_notice_replaces_and_retimes_the_pending_one() {
        let mut state = AppState::new();
        let t0 = Instant::now();

        state.notify_at("first", NoticeKind::Error, t0);
        let t1 = t0 + Duration::from_secs(3);
        state.notify_at("second", NoticeKind::Success, t1);

        // One second after the original would have expired, the replacement
        // is still visible because its timer started at t1.
        let t2 = t0 + Duration::from_secs(5);
        let notice = state.current_notice(t2).expect("replacement still visible");
        assert_eq!(notice.message(), "second");
        assert_eq!(notice.kind(), NoticeKind::Success);

        assert!(state.current_notice(t1 + NOTICE_TTL).is_none());
    }

    #[test]
    fn reset_session_state_clears_everything_together() {
        let mut state = AppState::new();
        state.session = Some(Session {
            token: "tok".to_string(),
            role: Role::Admin,
        });
        state.search_query = "dune".to_string();
        state.draft.title = "half-typed".to_string();
        state.pending_delete = Some(9);

        state.reset_session_state();

        assert!(state.session.is_none());
        assert!(state.search_query.is_empty());
        assert_eq!(state.draft, BookDraft::default());
        assert!(state.pending_delete.is_none());
    }
}
