//! JSON file-based session vault.
//!
//! This module persists the authenticated session as a single, human-readable
//! JSON document. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes, so the document on disk always holds either
//! the complete previous session or the complete new one.

use crate::domain::error::{CatalogError, Result};
use crate::domain::Session;
use crate::storage::backend::SessionVault;
use crate::storage::models::StoredSession;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Vault document format.
///
/// This is the top-level structure serialized to disk. Wrapping the session
/// record in a versioned object leaves room for future migrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VaultData {
    /// Version of the vault format for future migrations.
    version: u32,

    /// The persisted session record.
    session: StoredSession,
}

const VAULT_VERSION: u32 = 1;

/// JSON file session vault.
///
/// The logged-out state is the absence of the file: [`SessionVault::clear`]
/// removes it, so after logout no credential material remains on disk.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "session": {
///     "token": "eyJhbGciOi...",
///     "role": "admin"
///   }
/// }
/// ```
pub struct JsonVault {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonVault {
    /// Creates a vault backed by the given file path.
    ///
    /// The file itself is created lazily on the first save; construction only
    /// records the location.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    /// Saves the document to disk using atomic write.
    ///
    /// Writes to a temporary file first, then atomically renames it to the
    /// target path, so the vault is never left in a corrupt state even if the
    /// process crashes mid-write.
    fn save_to_file(&self, data: &VaultData) -> Result<()> {
        tracing::debug!(path = ?self.file_path, "saving session vault");

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| CatalogError::Storage(format!("failed to serialize session: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("session vault saved");
        Ok(())
    }
}

impl SessionVault for JsonVault {
    fn load(&self) -> Result<Option<Session>> {
        let _span = tracing::debug_span!("vault_load", path = ?self.file_path).entered();

        if !self.file_path.exists() {
            tracing::debug!("no persisted session");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        let data: VaultData = serde_json::from_str(&contents)
            .map_err(|e| CatalogError::Storage(format!("failed to parse session file: {e}")))?;

        tracing::debug!(version = data.version, role = %data.session.role, "session restored");
        Ok(Some(data.session.into_session()))
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        let _span = tracing::debug_span!("vault_save", role = %session.role).entered();

        self.save_to_file(&VaultData {
            version: VAULT_VERSION,
            session: StoredSession::from(session),
        })
    }

    fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("vault_clear", path = ?self.file_path).entered();

        match std::fs::remove_file(&self.file_path) {
            Ok(()) => {
                tracing::debug!("persisted session removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn session() -> Session {
        Session {
            token: "tok-123".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn load_returns_none_when_nothing_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let vault = JsonVault::new(dir.path().join("session.json"));
        assert_eq!(vault.load().unwrap(), None);
    }

    #[test]
    fn save_then_load_round_trips_token_and_role_together() {
        let dir = tempfile::tempdir().unwrap();
        let mut vault = JsonVault::new(dir.path().join("session.json"));

        vault.save(&session()).unwrap();
        let restored = vault.load().unwrap().expect("session should be persisted");
        assert_eq!(restored, session());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut vault = JsonVault::new(dir.path().join("nested").join("deep").join("session.json"));

        vault.save(&session()).unwrap();
        assert!(vault.load().unwrap().is_some());
    }

    #[test]
    fn clear_removes_the_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let mut vault = JsonVault::new(path.clone());

        vault.save(&session()).unwrap();
        assert!(path.exists());

        vault.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(vault.load().unwrap(), None);

        // A second clear on an empty vault still succeeds.
        vault.clear().unwrap();
    }

    #[test]
    fn corrupt_file_surfaces_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let vault = JsonVault::new(path);
        assert!(matches!(vault.load(), Err(CatalogError::Storage(_))));
    }
}
