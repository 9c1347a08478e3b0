//! Client-side routing with auth and admin guards.
//!
//! Every navigation, including redirects issued by the guard itself and
//! the forced redirect after a session expiry, passes through
//! [`guard_decision`]. The decision order is load-bearing: the auth
//! check runs before the admin check, and a corrupted user record sends
//! the user back to sign-in while a merely insufficient one sends them
//! home.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thiserror::Error;

use crate::session::SessionStore;

/// Where expired or unauthenticated sessions are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where authenticated users lacking a required role are sent.
pub const HOME_PATH: &str = "/";

/// Redirect hops allowed before a navigation is abandoned.
const MAX_REDIRECT_HOPS: usize = 8;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("unknown route: {0}")]
    UnknownRoute(String),
    #[error("redirect loop while navigating to {0}")]
    RedirectLoop(String),
    #[error("navigation rejected: {0}")]
    Rejected(String),
}

/// A navigable destination and its access requirements.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: &'static str,
    pub requires_auth: bool,
    pub requires_admin: bool,
}

/// The full route table for the Engage client.
pub fn default_routes() -> Vec<Route> {
    vec![
        Route { path: "/", requires_auth: true, requires_admin: false },
        Route { path: "/login", requires_auth: false, requires_admin: false },
        Route { path: "/register", requires_auth: false, requires_admin: false },
        Route { path: "/questionnaire", requires_auth: true, requires_admin: false },
        Route { path: "/recommendations", requires_auth: true, requires_admin: false },
        Route { path: "/profile", requires_auth: true, requires_admin: false },
        Route { path: "/rewards", requires_auth: true, requires_admin: false },
        Route { path: "/admin", requires_auth: true, requires_admin: true },
        Route { path: "/admin/activities", requires_auth: true, requires_admin: true },
        Route { path: "/admin/config", requires_auth: true, requires_admin: true },
    ]
}

/// Outcome of guarding a single navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// Decide whether the session may enter `route`.
///
/// Checks run in order: a protected route without a credential redirects
/// to sign-in before the admin requirement is even considered. For admin
/// routes, an unparseable user record redirects to sign-in, while an
/// absent record or a non-admin role redirects home.
pub fn guard_decision(route: &Route, session: &SessionStore) -> GuardDecision {
    if route.requires_auth && !session.is_logged_in() {
        return GuardDecision::Redirect(LOGIN_PATH);
    }

    if route.requires_admin {
        return match session.identity() {
            Err(_) => GuardDecision::Redirect(LOGIN_PATH),
            Ok(Some(ref identity)) if identity.is_admin() => GuardDecision::Allow,
            Ok(_) => GuardDecision::Redirect(HOME_PATH),
        };
    }

    GuardDecision::Allow
}

/// Seam between the request layer and whatever drives navigation.
///
/// The request interceptor only needs to know where the user is and to
/// send them to sign-in; tests substitute a recording implementation.
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Path the user is currently on.
    fn location(&self) -> String;

    /// Move to `path`, subject to the guards.
    async fn navigate(&self, path: &str) -> Result<(), NavigationError>;
}

/// In-process router: holds the route table, the current location, and
/// applies the guard on every push.
pub struct Router {
    routes: Vec<Route>,
    session: Arc<SessionStore>,
    current: RwLock<String>,
}

impl Router {
    /// Router over [`default_routes`], starting at sign-in.
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self::with_routes(default_routes(), session)
    }

    /// Router over a custom route table, starting at sign-in.
    pub fn with_routes(routes: Vec<Route>, session: Arc<SessionStore>) -> Self {
        Self {
            routes,
            session,
            current: RwLock::new(LOGIN_PATH.to_string()),
        }
    }

    /// Path the router last committed.
    pub fn current(&self) -> String {
        self.current.read().unwrap().clone()
    }

    /// Look up a route by exact path.
    pub fn route(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Navigate to `path`, following guard redirects until a route
    /// admits the session. Returns the path actually committed.
    pub fn push(&self, path: &str) -> Result<String, NavigationError> {
        let mut target = path.to_string();

        for _ in 0..MAX_REDIRECT_HOPS {
            let route = self
                .route(&target)
                .ok_or_else(|| NavigationError::UnknownRoute(target.clone()))?;

            match guard_decision(route, &self.session) {
                GuardDecision::Allow => {
                    *self.current.write().unwrap() = target.clone();
                    log::debug!("Navigated to {}", target);
                    return Ok(target);
                }
                GuardDecision::Redirect(next) => {
                    log::debug!("Guard redirected {} -> {}", target, next);
                    target = next.to_string();
                }
            }
        }

        Err(NavigationError::RedirectLoop(path.to_string()))
    }
}

#[async_trait]
impl Navigator for Router {
    fn location(&self) -> String {
        self.current()
    }

    async fn navigate(&self, path: &str) -> Result<(), NavigationError> {
        self.push(path).map(|_| ())
    }
}
