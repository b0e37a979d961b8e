//! Libroteca: an interactive terminal client for a book-catalog REST service.
//!
//! Libroteca talks to a small catalog backend and provides:
//! - Token-based login with role-aware editing (admins mutate, users browse)
//! - A searchable local mirror of the remote book collection
//! - Refresh-after-write consistency: every mutation re-fetches the catalog
//! - A session persisted across runs in a JSON vault
//! - Transient, auto-dismissing notices instead of raw error output
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  REPL Shell (main.rs)                               │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Controller
//! │  - Authorization gate before every mutation         │  ← Business logic
//! │  - Busy/loading handling                            │
//! │  - Notice mapping                                   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Remote Layer  │
//! │ (ui/)         │   │ (storage/)    │   │ (remote/)     │
//! │ - Table       │   │ - JSON vault  │   │ - REST client │
//! │ - Notices     │   │ - Vault trait │   │ - Cache+guard │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory paths (infrastructure/)           │
//! │  - Error types (domain/error)                       │
//! │  - Book, session, authorization (domain/)           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Interaction controller, state container, notices
//! - [`domain`]: Core domain types (books, sessions, errors)
//! - [`infrastructure`]: Platform paths
//! - [`remote`]: Backend API seam, HTTP client, collection cache
//! - [`storage`]: Session persistence
//! - [`ui`]: Plain-text rendering
//! - [`observability`]: Tracing setup
//!
//! # Configuration
//!
//! Configuration merges three sources, later wins:
//!
//! 1. Built-in defaults
//! 2. `<data dir>/libroteca/config.toml`
//! 3. Environment: `LIBROTECA_API_URL`, `LIBROTECA_DATA_DIR`, `LIBROTECA_LOG`
//!
//! ```toml
//! # ~/.local/share/libroteca/config.toml
//! api_url = "http://localhost:3001/api"
//! log_filter = "info"
//! ```
//!
//! # Consistency model
//!
//! The collection cache is only ever replaced wholesale by a fetch result.
//! After any create/update/delete the client re-fetches the full collection
//! instead of patching local state, trading one extra round trip for the
//! guarantee that the view reflects server truth. At most one mutation is in
//! flight at a time; a second one is rejected while the first is pending.

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod remote;
pub mod storage;
pub mod ui;

pub use app::{AppState, Controller, FormMode, Notice, NoticeKind};
pub use domain::{
    is_authorized, BookDraft, BookId, BookRecord, CatalogAction, CatalogError, Result, Role,
    Session,
};
pub use remote::{CatalogApi, CollectionCache, HttpCatalog};
pub use storage::{JsonVault, SessionVault};

use serde::Deserialize;
use std::path::PathBuf;

/// Runtime configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the catalog backend, including any path prefix
    /// (e.g. `http://localhost:3001/api`).
    pub api_url: String,

    /// Directory holding the session vault and the optional config file.
    pub data_dir: PathBuf,

    /// Tracing filter directive (e.g. `info`, `libroteca=debug`).
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001/api".to_string(),
            data_dir: infrastructure::default_data_dir(),
            log_filter: "info".to_string(),
        }
    }
}

/// Optional values read from `config.toml`.
#[derive(Debug, Default, Deserialize)]
struct FileOverrides {
    api_url: Option<String>,
    data_dir: Option<PathBuf>,
    log_filter: Option<String>,
}

impl Config {
    /// Resolves the configuration from defaults, the optional TOML file, and
    /// the environment.
    ///
    /// `LIBROTECA_DATA_DIR` is applied before the file is looked up, since
    /// the data directory decides where `config.toml` lives; the file may
    /// still relocate the data directory when the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] when the file exists but cannot be
    /// parsed, and [`CatalogError::Io`] when it cannot be read.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        let data_dir_pinned = match env_value("LIBROTECA_DATA_DIR") {
            Some(dir) => {
                config.data_dir = PathBuf::from(dir);
                true
            }
            None => false,
        };

        let file = infrastructure::config_file(&config.data_dir);
        if file.exists() {
            let raw = std::fs::read_to_string(&file)?;
            let overrides: FileOverrides = toml::from_str(&raw)
                .map_err(|e| CatalogError::Config(format!("{}: {e}", file.display())))?;
            tracing::debug!(path = ?file, "configuration file loaded");
            config.apply(overrides, data_dir_pinned);
        }

        if let Some(url) = env_value("LIBROTECA_API_URL") {
            config.api_url = url;
        }
        if let Some(filter) = env_value("LIBROTECA_LOG") {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Merges file values into the defaults.
    fn apply(&mut self, overrides: FileOverrides, data_dir_pinned: bool) {
        if let Some(url) = overrides.api_url {
            self.api_url = url;
        }
        if let (false, Some(dir)) = (data_dir_pinned, overrides.data_dir) {
            self.data_dir = dir;
        }
        if let Some(filter) = overrides.log_filter {
            self.log_filter = filter;
        }
    }

    /// Location of the session vault file for this configuration.
    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        infrastructure::session_file(&self.data_dir)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Builds the production controller for a configuration.
///
/// This is the composition root: the HTTP client and the JSON vault are
/// constructed here and injected into the controller; nothing else in the
/// crate knows about concrete backends.
#[must_use]
pub fn initialize(config: &Config) -> Controller<HttpCatalog, JsonVault> {
    tracing::debug!(api_url = %config.api_url, "initializing client");
    Controller::new(
        HttpCatalog::new(config.api_url.clone()),
        JsonVault::new(config.session_file()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_overrides_merge_over_defaults() {
        let overrides: FileOverrides =
            toml::from_str("api_url = \"http://books.example/api\"\nlog_filter = \"debug\"")
                .unwrap();

        let mut config = Config::default();
        let default_dir = config.data_dir.clone();
        config.apply(overrides, false);

        assert_eq!(config.api_url, "http://books.example/api");
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.data_dir, default_dir);
    }

    #[test]
    fn pinned_data_dir_beats_the_file() {
        let overrides: FileOverrides = toml::from_str("data_dir = \"/elsewhere\"").unwrap();

        let mut config = Config::default();
        config.data_dir = PathBuf::from("/pinned");
        config.apply(overrides, true);

        assert_eq!(config.data_dir, PathBuf::from("/pinned"));
    }

    #[test]
    fn session_file_lives_in_the_data_dir() {
        let mut config = Config::default();
        config.data_dir = PathBuf::from("/data/libroteca");
        assert_eq!(
            config.session_file(),
            PathBuf::from("/data/libroteca/session.json")
        );
    }
}
