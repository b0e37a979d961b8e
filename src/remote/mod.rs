//! Remote collection layer: backend API and the local mirror.
//!
//! This module owns everything that crosses the network boundary. The
//! [`CatalogApi`] trait is the seam between the client and the REST backend;
//! [`HttpCatalog`] is its production implementation; [`CollectionCache`]
//! keeps the local view of the remote collection consistent through
//! refresh-after-write and serializes mutations.
//!
//! # Modules
//!
//! - `api`: Backend trait abstraction and wire request/response types
//! - `http`: reqwest-based implementation with bearer authorization
//! - `collection`: Cached collection view, filtering, and the mutation guard

pub mod api;
pub mod collection;
pub mod http;

pub use api::{BookPayload, CatalogApi, LoginRequest, LoginResponse};
pub use collection::{CollectionCache, WriteGuard};
pub use http::HttpCatalog;
