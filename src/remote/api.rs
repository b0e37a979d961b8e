//! Backend API abstraction and wire types.
//!
//! This module defines the [`CatalogApi`] trait that abstracts over the
//! book-catalog REST backend, along with the request/response shapes of its
//! wire contract. The production implementation is
//! [`HttpCatalog`](crate::remote::HttpCatalog); tests substitute an in-memory
//! fake, so every controller flow can be exercised without a server.
//!
//! The trait is minimal on purpose: one method per backend endpoint, nothing
//! resembling a generic HTTP layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::domain::{BookDraft, BookId, BookRecord, Role, Session};

/// Credentials sent to `POST /login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Successful `POST /login` response body.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}

impl LoginResponse {
    /// Converts the wire response into the domain session.
    #[must_use]
    pub fn into_session(self) -> Session {
        Session {
            token: self.token,
            role: self.role,
        }
    }
}

/// Body for `POST /books` and `PUT /books/{id}`.
///
/// Only title and author travel to the server; id and creation time are
/// server-owned.
#[derive(Debug, Serialize)]
pub struct BookPayload<'a> {
    pub title: &'a str,
    pub author: &'a str,
}

impl<'a> From<&'a BookDraft> for BookPayload<'a> {
    fn from(draft: &'a BookDraft) -> Self {
        Self {
            title: draft.title.trim(),
            author: draft.author.trim(),
        }
    }
}

/// Abstraction over the book-catalog backend.
///
/// All methods map 1:1 onto REST endpoints. Authorized calls take the bearer
/// token explicitly so the API layer stays stateless; the session lives with
/// the controller.
#[async_trait]
pub trait CatalogApi {
    /// Exchanges credentials for a session.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Credentials`](crate::domain::CatalogError::Credentials)
    /// on any rejection; transport failures as
    /// [`CatalogError::Network`](crate::domain::CatalogError::Network).
    async fn login(&self, username: &str, password: &str) -> Result<Session>;

    /// Fetches the full book collection in server order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    async fn list_books(&self, token: &str) -> Result<Vec<BookRecord>>;

    /// Creates a new record from the draft; the server assigns id and
    /// creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    async fn create_book(&self, token: &str, draft: &BookDraft) -> Result<BookRecord>;

    /// Replaces title and author of an existing record.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`](crate::domain::CatalogError::NotFound) when
    /// the record no longer exists; otherwise as for the other calls.
    async fn update_book(&self, token: &str, id: BookId, draft: &BookDraft) -> Result<BookRecord>;

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`](crate::domain::CatalogError::NotFound) when
    /// the record no longer exists; otherwise as for the other calls.
    async fn delete_book(&self, token: &str, id: BookId) -> Result<()>;
}
