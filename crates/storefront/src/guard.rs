//! Route guard for views that require a signed-in shopper.
//!
//! The guard is a pure predicate over [`SessionState`] plus a redirect. It
//! never signs anyone in or out and caches nothing, so it is evaluated
//! afresh on every navigation to a guarded path.
//!
//! # Example
//!
//! ```rust
//! use cylo_storefront::guard::{GuardOutcome, LOGIN_PATH, guard};
//! use cylo_storefront::state::SessionState;
//!
//! let session = SessionState::default();
//! assert_eq!(guard(&session, "profile"), GuardOutcome::Redirect(LOGIN_PATH));
//! ```

use crate::state::SessionState;

/// Where unauthorized visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Result of evaluating the guard for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<V> {
    /// The session holds an identity; render the requested view.
    Authorized(V),
    /// No identity; go here instead.
    Redirect(&'static str),
}

impl<V> GuardOutcome<V> {
    /// Whether the requested view may render.
    #[must_use]
    pub const fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }

    /// Transform the authorized view, keeping any redirect.
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> GuardOutcome<U> {
        match self {
            Self::Authorized(view) => GuardOutcome::Authorized(f(view)),
            Self::Redirect(to) => GuardOutcome::Redirect(to),
        }
    }
}

/// `true` iff the session currently holds an identity.
#[must_use]
pub const fn is_authorized(session: &SessionState) -> bool {
    session.is_authenticated()
}

/// Wrap `view` so it only renders for a signed-in shopper.
#[must_use]
pub fn guard<V>(session: &SessionState, view: V) -> GuardOutcome<V> {
    if is_authorized(session) {
        GuardOutcome::Authorized(view)
    } else {
        tracing::debug!(redirect = LOGIN_PATH, "Guarded view requested without identity");
        GuardOutcome::Redirect(LOGIN_PATH)
    }
}
