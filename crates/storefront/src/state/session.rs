//! Session state: who, if anyone, is signed in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cylo_core::{Email, UserId};

/// The authenticated shopper.
///
/// Created by the authentication collaborator after a successful login and
/// handed to [`SessionState::sign_in`]. The storefront treats it as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Shopper ID issued by the authentication provider.
    pub id: UserId,
    /// Shopper's email address.
    pub email: Email,
    /// When the shopper signed in.
    pub signed_in_at: DateTime<Utc>,
}

impl Identity {
    /// Create an identity stamped with the current time.
    #[must_use]
    pub fn new(id: UserId, email: Email) -> Self {
        Self {
            id,
            email,
            signed_in_at: Utc::now(),
        }
    }
}

/// Holds the current identity, or none.
///
/// No validation lives here; whoever calls [`Self::sign_in`] has already
/// authenticated the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    identity: Option<Identity>,
}

impl SessionState {
    /// A session with the given identity already signed in.
    #[must_use]
    pub const fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Whether an identity is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Set the identity, returning whoever was signed in before.
    pub fn sign_in(&mut self, identity: Identity) -> Option<Identity> {
        self.identity.replace(identity)
    }

    /// Clear the identity, returning it.
    pub fn sign_out(&mut self) -> Option<Identity> {
        self.identity.take()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identity(id: u64) -> Identity {
        Identity::new(UserId::new(id), Email::parse("shopper@cylo.example").unwrap())
    }

    #[test]
    fn test_default_is_anonymous() {
        let session = SessionState::default();
        assert!(!session.is_authenticated());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_sign_in_replaces_previous_identity() {
        let mut session = SessionState::default();
        assert!(session.sign_in(identity(1)).is_none());

        let previous = session.sign_in(identity(2)).unwrap();
        assert_eq!(previous.id, UserId::new(1));
        assert_eq!(session.current().unwrap().id, UserId::new(2));
    }

    #[test]
    fn test_sign_out_clears() {
        let mut session = SessionState::signed_in(identity(5));
        let removed = session.sign_out().unwrap();

        assert_eq!(removed.id, UserId::new(5));
        assert!(!session.is_authenticated());
        assert!(session.sign_out().is_none());
    }
}
