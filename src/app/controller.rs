//! Interaction controller coordinating session, collection, and user actions.
//!
//! This module implements the single coordinator through which every user
//! action flows: login, logout, form submission, edit and delete requests,
//! and searching. It owns the explicit context built by the composition root
//! (API client, session vault, application state, collection cache) rather
//! than reaching for ambient globals.
//!
//! # Control flow
//!
//! The controller follows a unidirectional pattern:
//! 1. The shell translates user input into a controller call
//! 2. Authorization is checked through the central predicate before any
//!    mutating work
//! 3. The remote layer performs the network I/O (with refresh-after-write)
//! 4. The outcome is folded back into [`AppState`] as a transient notice
//!
//! Every failure is caught at this boundary: callers receive the typed error
//! for inspection, but the user only ever sees the short notice text, never a
//! raw transport error. An HTTP 401 on any authorized call forces a logout,
//! clearing both the in-memory session and the persisted one.

use crate::app::state::AppState;
use crate::domain::error::{CatalogError, Result};
use crate::domain::{is_authorized, BookDraft, BookId, CatalogAction};
use crate::remote::{CatalogApi, CollectionCache};
use crate::storage::SessionVault;

/// The interaction controller.
///
/// Generic over the API seam and the session vault so tests can substitute an
/// in-memory fake for either. `state` and `collection` are public: the shell
/// reads them to render, and they have no invariants a caller could break
/// that the controller does not re-establish on the next call.
pub struct Controller<A, V> {
    api: A,
    vault: V,
    pub state: AppState,
    pub collection: CollectionCache,
}

impl<A, V> Controller<A, V>
where
    A: CatalogApi + Sync,
    V: SessionVault,
{
    /// Builds a controller around the given API client and vault.
    pub fn new(api: A, vault: V) -> Self {
        Self {
            api,
            vault,
            state: AppState::new(),
            collection: CollectionCache::new(),
        }
    }

    /// Restores a persisted session and, if one exists, loads the catalog.
    ///
    /// The token is not validated here; a dead token surfaces on the first
    /// authorized call. An unreadable vault is treated as "no session" so a
    /// corrupt file cannot brick the client.
    pub async fn bootstrap(&mut self) {
        match self.vault.load() {
            Ok(Some(session)) => {
                tracing::info!(role = %session.role, "session restored");
                self.state.session = Some(session);
                // A failed initial fetch has already been surfaced as a notice.
                let _ = self.refresh().await;
            }
            Ok(None) => {
                tracing::debug!("no persisted session");
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not restore session, starting logged out");
            }
        }
    }

    /// Exchanges credentials for a session and performs the initial fetch.
    ///
    /// On success the session is persisted and a welcome notice posted. On
    /// failure the existing session (in memory and on disk) is untouched.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Credentials`] on rejection,
    /// [`CatalogError::Network`] if the backend is unreachable.
    pub async fn submit_login(&mut self, username: &str, password: &str) -> Result<()> {
        tracing::debug!(username = %username, "logging in");

        self.state.loading = true;
        let result = self.api.login(username, password).await;
        self.state.loading = false;

        let session = match result {
            Ok(session) => session,
            Err(e) => {
                tracing::debug!(error = %e, "login failed");
                self.state.notify_error("Incorrect username or password");
                return Err(e);
            }
        };

        if let Err(e) = self.vault.save(&session) {
            tracing::warn!(error = %e, "failed to persist session");
            self.state.notify_error("Signed in, but the session could not be saved");
        } else {
            self.state.notify_success(format!("Welcome! Signed in as {}", session.role));
        }
        self.state.session = Some(session);

        // Initial fetch; a failure has already been surfaced as a notice.
        let _ = self.refresh().await;
        Ok(())
    }

    /// Re-fetches the collection from the backend.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Forbidden`] when logged out; otherwise the API
    /// failure. On failure the prior cache is left intact.
    pub async fn refresh(&mut self) -> Result<()> {
        let token = self.guard(CatalogAction::View, "Log in to browse the catalog")?;

        self.state.loading = true;
        let result = self.collection.refresh(&self.api, &token).await;
        self.state.loading = false;

        result.map_err(|e| self.report("Could not load the books", e))
    }

    /// Submits the current draft: create in create-mode, update in edit-mode.
    ///
    /// Rejects before any network call when the session may not mutate or the
    /// draft is invalid. On a successful write the draft resets to
    /// create-mode blanks; this includes the case where the write landed but
    /// the follow-up fetch failed.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Forbidden`], [`CatalogError::Invalid`],
    /// [`CatalogError::Busy`], [`CatalogError::NotFound`] (edit-mode),
    /// [`CatalogError::Refresh`], or [`CatalogError::Network`].
    pub async fn submit_form(&mut self) -> Result<()> {
        let token = self.guard(
            CatalogAction::Mutate,
            "You do not have permission to perform this action",
        )?;

        if let Err(e) = self.state.draft.validate() {
            return Err(self.report("Could not save the book", e));
        }

        let draft = self.state.draft.clone();

        self.state.loading = true;
        let result = match draft.editing {
            None => self.collection.create(&self.api, &token, &draft).await,
            Some(id) => self.collection.update(&self.api, &token, id, &draft).await,
        };
        self.state.loading = false;

        match result {
            Ok(()) => {
                let message = if draft.is_editing() { "Book updated" } else { "Book added" };
                self.state.draft.reset();
                self.state.notify_success(message);
                Ok(())
            }
            Err(e @ CatalogError::Refresh(_)) => {
                // The write itself landed, so the form is done.
                self.state.draft.reset();
                Err(self.report("Could not save the book", e))
            }
            Err(e) => Err(self.report("Could not save the book", e)),
        }
    }

    /// Loads a cached record into the draft and enters edit-mode.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Forbidden`] for non-admin sessions (no state is
    /// touched), [`CatalogError::NotFound`] when the id is not in the cache.
    pub fn request_edit(&mut self, id: BookId) -> Result<()> {
        self.guard(CatalogAction::Mutate, "You do not have permission to edit")?;

        let Some(record) = self.collection.get(id).cloned() else {
            self.state.notify_error("Book not found");
            return Err(CatalogError::NotFound);
        };

        tracing::debug!(book_id = id, title = %record.title, "entering edit mode");
        self.state.draft = BookDraft::load(&record);
        Ok(())
    }

    /// Abandons the draft and returns to create-mode.
    pub fn cancel_edit(&mut self) {
        tracing::debug!("edit cancelled");
        self.state.draft.reset();
    }

    /// Marks a record for deletion, pending explicit confirmation.
    ///
    /// Returns the record's title so the shell can phrase the confirmation
    /// question. Nothing is dispatched until [`Controller::confirm_delete`].
    ///
    /// # Errors
    ///
    /// [`CatalogError::Forbidden`] for non-admin sessions,
    /// [`CatalogError::NotFound`] when the id is not in the cache.
    pub fn request_delete(&mut self, id: BookId) -> Result<String> {
        self.guard(CatalogAction::Mutate, "You do not have permission to delete")?;

        let Some(record) = self.collection.get(id).cloned() else {
            self.state.notify_error("Book not found");
            return Err(CatalogError::NotFound);
        };

        tracing::debug!(book_id = id, "delete pending confirmation");
        self.state.pending_delete = Some(id);
        Ok(record.title)
    }

    /// Dispatches the pending delete.
    ///
    /// A no-op when nothing is pending. The authorization gate runs again at
    /// dispatch time; the pending target is consumed either way.
    ///
    /// # Errors
    ///
    /// As for [`Controller::submit_form`], with delete-flavoured notices.
    pub async fn confirm_delete(&mut self) -> Result<()> {
        let Some(id) = self.state.pending_delete.take() else {
            tracing::debug!("no delete pending");
            return Ok(());
        };

        let token = self.guard(CatalogAction::Mutate, "You do not have permission to delete")?;

        self.state.loading = true;
        let result = self.collection.delete(&self.api, &token, id).await;
        self.state.loading = false;

        match result {
            Ok(()) => {
                self.state.notify_success("Book deleted");
                Ok(())
            }
            Err(e) => Err(self.report("Could not delete the book", e)),
        }
    }

    /// Drops the pending delete without dispatching it.
    pub fn cancel_delete(&mut self) {
        if self.state.pending_delete.take().is_some() {
            tracing::debug!("delete cancelled");
        }
    }

    /// Updates the search query; filtering happens on read.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }

    /// The records to display: the cache filtered by the current query.
    #[must_use]
    pub fn visible_books(&self) -> Vec<&crate::domain::BookRecord> {
        self.collection.filter(&self.state.search_query)
    }

    /// Ends the session: clears memory state, the cached collection, and the
    /// persisted session.
    ///
    /// Idempotent; logging out while logged out is fine.
    ///
    /// # Errors
    ///
    /// Storage errors from removing the persisted session. Memory state is
    /// cleared even then.
    pub fn logout(&mut self) -> Result<()> {
        tracing::info!("logging out");
        self.state.reset_session_state();
        self.collection.clear();

        if let Err(e) = self.vault.clear() {
            return Err(self.report("Could not clear the stored session", e));
        }

        self.state.notify_success("Session closed");
        Ok(())
    }

    /// Checks the central authorization predicate and hands out the token.
    ///
    /// Posts the given notice and fails without touching any other state when
    /// the session does not permit the action.
    fn guard(&mut self, action: CatalogAction, denied: &str) -> Result<String> {
        if is_authorized(self.state.session.as_ref(), action) {
            if let Some(session) = &self.state.session {
                return Ok(session.token.clone());
            }
        }
        tracing::debug!(action = ?action, "not authorized");
        self.state.notify_error(denied);
        Err(CatalogError::Forbidden)
    }

    /// Folds a failure into a user-facing notice and passes the error on.
    ///
    /// A rejected token (directly or inside a refresh wrapper) forces a
    /// logout instead of a plain notice.
    fn report(&mut self, fallback: &str, err: CatalogError) -> CatalogError {
        if err.invalidates_session() {
            self.force_logout();
            return err;
        }

        let message = match &err {
            CatalogError::Forbidden => "You do not have permission to perform this action".to_string(),
            CatalogError::Busy => "Another change is still in progress".to_string(),
            CatalogError::Invalid(reason) => reason.clone(),
            CatalogError::Refresh(_) => "Saved, but reloading the catalog failed".to_string(),
            _ => fallback.to_string(),
        };
        tracing::debug!(error = %err, "operation failed");
        self.state.notify_error(message);
        err
    }

    /// The backend stopped accepting the token: drop everything session-bound.
    fn force_logout(&mut self) {
        tracing::warn!("token rejected by the backend, logging out");
        self.state.reset_session_state();
        self.collection.clear();
        if let Err(e) = self.vault.clear() {
            tracing::warn!(error = %e, "failed to clear the stored session");
        }
        self.state.notify_error("Your session has expired, please log in again");
    }
}
