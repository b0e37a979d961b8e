//! Session persistence abstraction.
//!
//! This module defines the [`SessionVault`] trait that abstracts over the
//! durable store holding the authenticated session between runs. This allows
//! seamless switching between storage implementations without changing
//! business logic.
//!
//! # Design Philosophy
//!
//! The trait is deliberately minimal: the client persists exactly one piece of
//! state (the `{token, role}` pair) and only ever replaces or removes it as a
//! whole. Each method maps directly to a controller use case (restore on
//! startup, save on login, clear on logout).

use crate::domain::error::Result;
use crate::domain::Session;

/// Abstraction over the durable session store.
///
/// # Implementations
///
/// - [`JsonVault`](crate::storage::JsonVault): one JSON document with atomic
///   writes (default)
pub trait SessionVault {
    /// Loads the previously persisted session, if any.
    ///
    /// Called once on startup. The token is not validated against the
    /// backend here; validity is discovered lazily on the first authorized
    /// call.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<Session>>;

    /// Persists the session, replacing any previous one.
    ///
    /// Token and role are written as a single record; a failed save leaves
    /// the previous record intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&mut self, session: &Session) -> Result<()>;

    /// Removes the persisted session.
    ///
    /// Idempotent: clearing an empty vault succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails for reasons other than the
    /// record already being absent.
    fn clear(&mut self) -> Result<()>;
}
