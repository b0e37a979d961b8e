//! Session identity and the authorization predicate.
//!
//! A [`Session`] is the authenticated identity held by the client: the opaque
//! bearer token plus the role the backend granted at login. The type carries
//! both fields unconditionally, so "role without token" and "token without
//! role" are unrepresentable; the logged-out state is `Option<Session>`.
//!
//! Authorization is centralized in the single [`is_authorized`] predicate
//! rather than repeated inline checks, so every mutating entry point shares
//! one source of truth.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role granted by the backend at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May list, search, and mutate the catalog.
    Admin,
    /// May list and search only.
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

/// The authenticated identity: bearer token and granted role.
///
/// Persisted as a unit across restarts and cleared as a unit on logout or on
/// a forced logout after the backend rejects the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

/// The two classes of catalog operations the client distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogAction {
    /// Listing and searching the collection.
    View,
    /// Creating, updating, or deleting records.
    Mutate,
}

/// Pure authorization predicate.
///
/// Viewing requires any session; mutating requires an admin session. No
/// session permits nothing.
///
/// # Examples
///
/// ```
/// use libroteca::domain::{is_authorized, CatalogAction, Role, Session};
///
/// let admin = Session { token: "t".to_string(), role: Role::Admin };
/// let reader = Session { token: "t".to_string(), role: Role::User };
///
/// assert!(is_authorized(Some(&admin), CatalogAction::Mutate));
/// assert!(is_authorized(Some(&reader), CatalogAction::View));
/// assert!(!is_authorized(Some(&reader), CatalogAction::Mutate));
/// assert!(!is_authorized(None, CatalogAction::View));
/// ```
#[must_use]
pub fn is_authorized(session: Option<&Session>, action: CatalogAction) -> bool {
    match (session, action) {
        (None, _) => false,
        (Some(_), CatalogAction::View) => true,
        (Some(session), CatalogAction::Mutate) => session.role == Role::Admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        assert_eq!(serde_json::from_str::<Role>(r#""user""#).unwrap(), Role::User);
    }

    #[test]
    fn mutation_requires_admin() {
        let session = Session {
            token: "tok".to_string(),
            role: Role::User,
        };
        assert!(is_authorized(Some(&session), CatalogAction::View));
        assert!(!is_authorized(Some(&session), CatalogAction::Mutate));
        assert!(!is_authorized(None, CatalogAction::Mutate));
    }
}
