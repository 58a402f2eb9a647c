//! Location tracking and navigation.

use tracing::instrument;

use super::{Route, View, pathname};
use crate::guard::{GuardOutcome, guard};
use crate::state::SessionState;

/// What a navigation resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The requested view renders.
    Rendered(View),
    /// The requested route is guarded and the session has no identity.
    /// The location was replaced with `to`.
    Redirected { from: String, to: &'static str },
    /// No route matches; the not-found view is up to the renderer.
    NotFound,
}

/// Record of one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Pathname that was asked for.
    pub requested: String,
    /// Pathname the router ended up at.
    pub location: String,
    pub outcome: Outcome,
}

impl Navigation {
    /// The view that ends up on screen, if any route matched.
    #[must_use]
    pub fn view(&self) -> Option<View> {
        match &self.outcome {
            Outcome::Rendered(view) => Some(view.clone()),
            Outcome::Redirected { to, .. } => Route::parse(to).map(|route| route.view()),
            Outcome::NotFound => None,
        }
    }

    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self.outcome, Outcome::Redirected { .. })
    }
}

/// The current location and the history that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    history: Vec<String>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Router {
    /// Start at the given path.
    ///
    /// The start path is recorded as-is; it is resolved (and guarded) on the
    /// first call to [`Self::resolve_current`] or [`Self::navigate`].
    #[must_use]
    pub fn new(start: &str) -> Self {
        Self {
            history: vec![pathname(start)],
        }
    }

    /// Current pathname.
    #[must_use]
    pub fn location(&self) -> &str {
        self.history.last().map_or("/", String::as_str)
    }

    /// Every pathname visited, oldest first; the last entry is the current one.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Navigate to `path`, consulting the route guard for protected views.
    ///
    /// A guard redirect replaces the requested entry: the guarded path never
    /// lands in the history.
    #[instrument(skip(self, session), fields(authenticated = session.is_authenticated()))]
    pub fn navigate(&mut self, path: &str, session: &SessionState) -> Navigation {
        let requested = pathname(path);
        let outcome = Self::resolve(&requested, session);

        let location = match &outcome {
            Outcome::Redirected { to, .. } => (*to).to_string(),
            Outcome::Rendered(_) | Outcome::NotFound => requested.clone(),
        };

        if self.location() != location {
            self.history.push(location.clone());
        }

        tracing::debug!(%requested, %location, ?outcome, "Navigated");
        Navigation {
            requested,
            location,
            outcome,
        }
    }

    /// Go back one entry, re-evaluating the guard for it.
    ///
    /// The previous entry becomes current in place; if it is now guarded it
    /// is replaced with the redirect target. Returns `None` at the start of
    /// the history.
    pub fn back(&mut self, session: &SessionState) -> Option<Navigation> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        Some(self.resolve_current(session))
    }

    /// Resolve the current location against the current session.
    ///
    /// Used when the session changes without a navigation, e.g. a logout
    /// while a guarded view is showing.
    pub fn resolve_current(&mut self, session: &SessionState) -> Navigation {
        let current = self.location().to_string();
        let outcome = Self::resolve(&current, session);

        let location = match &outcome {
            Outcome::Redirected { to, .. } => {
                // Replace, as a redirect would have.
                self.history.pop();
                if self.location() != *to {
                    self.history.push((*to).to_string());
                }
                (*to).to_string()
            }
            Outcome::Rendered(_) | Outcome::NotFound => current.clone(),
        };

        Navigation {
            requested: current,
            location,
            outcome,
        }
    }

    fn resolve(pathname: &str, session: &SessionState) -> Outcome {
        let Some(route) = Route::parse(pathname) else {
            return Outcome::NotFound;
        };

        if !route.is_guarded() {
            return Outcome::Rendered(route.view());
        }

        match guard(session, route.view()) {
            GuardOutcome::Authorized(view) => Outcome::Rendered(view),
            GuardOutcome::Redirect(to) => Outcome::Redirected {
                from: pathname.to_string(),
                to,
            },
        }
    }
}
