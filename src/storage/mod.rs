//! Storage layer for the persisted session.
//!
//! This module provides the persistence abstraction that keeps the
//! authenticated session (`token` + `role`) alive across restarts. It uses a
//! single JSON document with atomic writes; logging out removes the document.
//!
//! # Modules
//!
//! - `backend`: Vault trait abstraction for backend implementations
//! - `json`: JSON file-based vault implementation
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod json;
pub mod models;

pub use backend::SessionVault;
pub use json::JsonVault;
pub use models::StoredSession;
