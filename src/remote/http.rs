//! HTTP implementation of the catalog API.
//!
//! [`HttpCatalog`] wraps a shared [`reqwest::Client`] and speaks the backend's
//! REST contract: JSON bodies, bearer authorization, and the status mapping
//! described on [`CatalogError`](crate::domain::CatalogError): 401 means the
//! token died, 404 means the target record is gone, anything else non-success
//! is a plain network failure.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::domain::error::{CatalogError, Result};
use crate::domain::{BookDraft, BookId, BookRecord, Session};
use crate::remote::api::{BookPayload, CatalogApi, LoginRequest, LoginResponse};

/// REST client for the book-catalog backend.
///
/// Cheap to clone; the inner `reqwest::Client` holds the connection pool.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    client: Client,
}

impl HttpCatalog {
    /// Creates a client for the given base URL (e.g. `http://localhost:3001/api`).
    ///
    /// A trailing slash on the base URL is tolerated and stripped.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Maps an authorized call's failure status, then lets `error_for_status`
    /// fold the remaining non-success codes into a network error.
    fn check_authorized(response: reqwest::Response, missing_target: bool) -> Result<reqwest::Response> {
        match response.status() {
            StatusCode::UNAUTHORIZED => Err(CatalogError::SessionExpired),
            StatusCode::FORBIDDEN => Err(CatalogError::Forbidden),
            StatusCode::NOT_FOUND if missing_target => Err(CatalogError::NotFound),
            _ => Ok(response.error_for_status()?),
        }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn login(&self, username: &str, password: &str) -> Result<Session> {
        tracing::debug!(username = %username, "POST login");

        let response = self
            .client
            .post(self.url("login"))
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "login rejected");
            return Err(CatalogError::Credentials);
        }

        let body: LoginResponse = response.json().await?;
        tracing::debug!(role = %body.role, "login accepted");
        Ok(body.into_session())
    }

    async fn list_books(&self, token: &str) -> Result<Vec<BookRecord>> {
        tracing::debug!("GET books");

        let response = self
            .client
            .get(self.url("books"))
            .bearer_auth(token)
            .send()
            .await?;

        let response = Self::check_authorized(response, false)?;
        let books: Vec<BookRecord> = response.json().await?;

        tracing::debug!(count = books.len(), "collection fetched");
        Ok(books)
    }

    async fn create_book(&self, token: &str, draft: &BookDraft) -> Result<BookRecord> {
        tracing::debug!(title = %draft.title, "POST books");

        let response = self
            .client
            .post(self.url("books"))
            .bearer_auth(token)
            .json(&BookPayload::from(draft))
            .send()
            .await?;

        let response = Self::check_authorized(response, false)?;
        Ok(response.json().await?)
    }

    async fn update_book(&self, token: &str, id: BookId, draft: &BookDraft) -> Result<BookRecord> {
        tracing::debug!(book_id = id, "PUT books/{id}");

        let response = self
            .client
            .put(self.url(&format!("books/{id}")))
            .bearer_auth(token)
            .json(&BookPayload::from(draft))
            .send()
            .await?;

        let response = Self::check_authorized(response, true)?;
        Ok(response.json().await?)
    }

    async fn delete_book(&self, token: &str, id: BookId) -> Result<()> {
        tracing::debug!(book_id = id, "DELETE books/{id}");

        let response = self
            .client
            .delete(self.url(&format!("books/{id}")))
            .bearer_auth(token)
            .send()
            .await?;

        // 200 and 204 are both success here; the body, if any, is ignored.
        Self::check_authorized(response, true)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let api = HttpCatalog::new("http://localhost:3001/api/");
        assert_eq!(api.url("books"), "http://localhost:3001/api/books");
        assert_eq!(api.url("books/5"), "http://localhost:3001/api/books/5");
    }
}
