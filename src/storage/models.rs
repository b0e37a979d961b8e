//! Storage record models for the persistence layer.
//!
//! This module defines the raw storage record types used for persistence
//! operations. These types are separate from domain models to maintain a clear
//! boundary between the on-disk representation and business logic.

use serde::{Deserialize, Serialize};

use crate::domain::{Role, Session};

/// The persisted session as written to disk.
///
/// Token and role are stored as one record and therefore can only ever be
/// saved, loaded, or removed together; a half-written session (token without
/// role or vice versa) cannot exist on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Opaque bearer credential issued by the backend at login.
    pub token: String,

    /// Role the backend granted for this token.
    pub role: Role,
}

impl StoredSession {
    /// Converts the storage record into the domain session.
    #[must_use]
    pub fn into_session(self) -> Session {
        Session {
            token: self.token,
            role: self.role,
        }
    }
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.clone(),
            role: session.role,
        }
    }
}
