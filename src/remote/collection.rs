//! Local mirror of the remote book collection.
//!
//! [`CollectionCache`] owns the in-memory list of book records fetched from
//! the backend and mediates every mutation against it. Two policies live
//! here:
//!
//! - **Refresh-after-write**: after a successful create/update/delete the
//!   cache is never patched speculatively; the full collection is re-fetched
//!   so the local view is guaranteed to reflect server truth, at the cost of
//!   one extra round trip. The cache is only ever replaced wholesale by a
//!   fetch result.
//! - **One mutation in flight**: mutations are serialized by an atomic busy
//!   flag held through a scope guard. A second mutating call while one is
//!   outstanding fails fast with [`CatalogError::Busy`] before any network
//!   traffic. Reads are idempotent and not gated.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::error::{CatalogError, Result};
use crate::domain::{BookDraft, BookId, BookRecord};
use crate::remote::api::CatalogApi;

/// Releases the collection's busy flag when dropped.
///
/// Acquired at the top of every mutating operation so the flag is lowered on
/// all exit paths, including early `?` returns.
#[derive(Debug)]
pub struct WriteGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// The client's local mirror of the server's book collection.
#[derive(Debug, Default)]
pub struct CollectionCache {
    /// Records in the order of the last successful fetch.
    books: Vec<BookRecord>,

    /// Raised while a mutating operation is in flight.
    busy: Arc<AtomicBool>,
}

impl CollectionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records from the last successful fetch, in server order.
    #[must_use]
    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    /// Looks up a cached record by id.
    #[must_use]
    pub fn get(&self, id: BookId) -> Option<&BookRecord> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Whether a mutating operation is currently in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Drops the cached collection (used on logout).
    pub fn clear(&mut self) {
        self.books.clear();
    }

    /// Acquires the mutation guard, or fails if one is already held.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Busy`] while another mutation is outstanding.
    pub fn try_begin_write(&self) -> Result<WriteGuard> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("mutation rejected: another one is in flight");
            return Err(CatalogError::Busy);
        }
        Ok(WriteGuard {
            flag: Arc::clone(&self.busy),
        })
    }

    /// Case-insensitive substring filter over title OR author.
    ///
    /// An empty (or all-whitespace) query returns the full cache; ordering is
    /// preserved from the last fetch either way.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&BookRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.books.iter().collect();
        }
        self.books.iter().filter(|book| book.matches(&needle)).collect()
    }

    /// Fetches the full collection and replaces the cache atomically.
    ///
    /// On failure the prior cache is left intact.
    ///
    /// # Errors
    ///
    /// Propagates the API failure unchanged.
    pub async fn refresh<A: CatalogApi + Sync + ?Sized>(&mut self, api: &A, token: &str) -> Result<()> {
        let books = api.list_books(token).await?;
        tracing::debug!(count = books.len(), "collection replaced");
        self.books = books;
        Ok(())
    }

    /// Creates a record, then re-fetches the collection.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Busy`] if a mutation is already in flight; the create
    /// failure unchanged if step one fails; [`CatalogError::Refresh`] if the
    /// create succeeded but the re-fetch did not.
    pub async fn create<A: CatalogApi + Sync + ?Sized>(
        &mut self,
        api: &A,
        token: &str,
        draft: &BookDraft,
    ) -> Result<()> {
        let _guard = self.try_begin_write()?;
        let created = api.create_book(token, draft).await?;
        tracing::debug!(book_id = created.id, "record created");
        self.refresh_after_write(api, token).await
    }

    /// Updates a record, then re-fetches the collection.
    ///
    /// # Errors
    ///
    /// As for [`CollectionCache::create`], plus
    /// [`CatalogError::NotFound`] when the target is gone.
    pub async fn update<A: CatalogApi + Sync + ?Sized>(
        &mut self,
        api: &A,
        token: &str,
        id: BookId,
        draft: &BookDraft,
    ) -> Result<()> {
        let _guard = self.try_begin_write()?;
        let updated = api.update_book(token, id, draft).await?;
        tracing::debug!(book_id = updated.id, "record updated");
        self.refresh_after_write(api, token).await
    }

    /// Deletes a record, then re-fetches the collection.
    ///
    /// # Errors
    ///
    /// As for [`CollectionCache::update`].
    pub async fn delete<A: CatalogApi + Sync + ?Sized>(
        &mut self,
        api: &A,
        token: &str,
        id: BookId,
    ) -> Result<()> {
        let _guard = self.try_begin_write()?;
        api.delete_book(token, id).await?;
        tracing::debug!(book_id = id, "record deleted");
        self.refresh_after_write(api, token).await
    }

    /// Step two of every mutation: the unconditional re-fetch.
    ///
    /// A failure here is wrapped in [`CatalogError::Refresh`] so callers can
    /// tell "the write happened but the view may be stale" apart from "the
    /// write failed".
    async fn refresh_after_write<A: CatalogApi + Sync + ?Sized>(
        &mut self,
        api: &A,
        token: &str,
    ) -> Result<()> {
        self.refresh(api, token)
            .await
            .map_err(|e| CatalogError::Refresh(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: BookId, title: &str, author: &str) -> BookRecord {
        BookRecord {
            id,
            title: title.to_string(),
            author: author.to_string(),
            created_at: None,
        }
    }

    fn seeded() -> CollectionCache {
        CollectionCache {
            books: vec![
                record(1, "Dune", "Frank Herbert"),
                record(2, "The Dispossessed", "Ursula K. Le Guin"),
                record(3, "Neuromancer", "William Gibson"),
            ],
            busy: Arc::default(),
        }
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let cache = seeded();
        let all: Vec<BookId> = cache.filter("").iter().map(|b| b.id).collect();
        assert_eq!(all, vec![1, 2, 3]);

        let blank: Vec<BookId> = cache.filter("   ").iter().map(|b| b.id).collect();
        assert_eq!(blank, vec![1, 2, 3]);
    }

    #[test]
    fn filter_matches_title_or_author_case_insensitively() {
        let cache = seeded();

        let by_title: Vec<BookId> = cache.filter("dUnE").iter().map(|b| b.id).collect();
        assert_eq!(by_title, vec![1]);

        let by_author: Vec<BookId> = cache.filter("le guin").iter().map(|b| b.id).collect();
        assert_eq!(by_author, vec![2]);

        assert!(cache.filter("asimov").is_empty());
    }

    #[test]
    fn filter_preserves_fetch_order() {
        let cache = seeded();
        // "e" appears in all three records; order must match the cache.
        let hits: Vec<BookId> = cache.filter("e").iter().map(|b| b.id).collect();
        assert_eq!(hits, vec![1, 2, 3]);
    }

    #[test]
    fn write_guard_serializes_mutations() {
        let cache = seeded();

        let guard = cache.try_begin_write().expect("first acquire succeeds");
        assert!(cache.is_busy());
        assert!(matches!(cache.try_begin_write(), Err(CatalogError::Busy)));

        drop(guard);
        assert!(!cache.is_busy());
        assert!(cache.try_begin_write().is_ok());
    }

    #[test]
    fn get_finds_cached_records() {
        let cache = seeded();
        assert_eq!(cache.get(2).map(|b| b.title.as_str()), Some("The Dispossessed"));
        assert!(cache.get(99).is_none());
    }
}
