//! Error types for the Libroteca client.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! The taxonomy mirrors the recovery strategy: credential and authorization
//! failures are handled locally without touching session or collection state,
//! network-shaped failures leave the last-known-good state intact, and
//! [`CatalogError::SessionExpired`] is the one variant that forces a logout.

use thiserror::Error;

/// The main error type for catalog client operations.
///
/// This enum consolidates all error conditions that can occur while talking to
/// the backend or persisting local state. Transport and I/O errors wrap the
/// underlying error from the external crate using `#[from]` for automatic
/// conversion with `?`.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Login was rejected by the backend.
    ///
    /// Bad username or password. The existing session, if any, is untouched.
    #[error("invalid username or password")]
    Credentials,

    /// The current session is not allowed to perform the requested action.
    ///
    /// Raised before any network traffic when a non-admin session attempts a
    /// mutating operation.
    #[error("this action requires an admin session")]
    Forbidden,

    /// The backend no longer accepts the bearer token.
    ///
    /// Maps from an HTTP 401 on an authorized call. The controller reacts by
    /// clearing both the in-memory session and the persisted one.
    #[error("the session has expired")]
    SessionExpired,

    /// The target record does not exist on the backend.
    ///
    /// Maps from an HTTP 404 on update or delete. Displayed to the user the
    /// same way as a network failure; there is no special recovery.
    #[error("book not found on the server")]
    NotFound,

    /// A mutating operation is already in flight.
    ///
    /// Mutations are serialized per client instance; the second request is
    /// rejected rather than queued.
    #[error("another change is still in progress")]
    Busy,

    /// The form draft failed local validation.
    ///
    /// Empty title or author. No network call is made.
    #[error("invalid book data: {0}")]
    Invalid(String),

    /// Transport failure or an unexpected response status.
    ///
    /// Covers connection errors, malformed bodies, and any non-success status
    /// not mapped to a more specific variant. Prior cache and session state
    /// are left at their last-known-good values.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The write succeeded but the follow-up collection fetch failed.
    ///
    /// The two steps of a refresh-after-write transaction fail independently:
    /// this wrapper tells "saved, but the local view may be stale" apart from
    /// "nothing happened".
    #[error("the change was saved but reloading the catalog failed: {0}")]
    Refresh(#[source] Box<CatalogError>),

    /// Session persistence failed.
    ///
    /// Occurs when reading or writing the session file fails at the
    /// serialization level. The string describes what went wrong.
    #[error("session storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when the config file cannot be parsed or a required value is
    /// malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Whether this failure means the bearer token is no longer usable.
    ///
    /// The controller uses this to decide when to force a logout. A rejected
    /// token inside a [`CatalogError::Refresh`] wrapper counts too.
    #[must_use]
    pub fn invalidates_session(&self) -> bool {
        match self {
            Self::SessionExpired => true,
            Self::Refresh(inner) => inner.invalidates_session(),
            _ => false,
        }
    }
}

/// A specialized `Result` type for catalog client operations.
///
/// This is a type alias for `std::result::Result<T, CatalogError>` that
/// simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, CatalogError>;
