//! Application state for the Engage client.
//!
//! Wires the session store, router, and API client into one shared
//! graph: the client reads credentials from the session and drives the
//! router on expiry; the router consults the same session for guards.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Config;
use crate::notify::{LogNotifier, Notifier};
use crate::router::{Navigator, Router};
use crate::session::SessionStore;
use crate::storage::Storage;

/// Shared application state.
pub struct AppState {
    pub session: Arc<SessionStore>,
    pub router: Arc<Router>,
    pub api: Arc<ApiClient>,
}

impl AppState {
    /// Build the full pipeline from configuration, reporting errors via
    /// the log.
    pub fn new(config: &Config) -> Self {
        Self::with_notifier(config, Arc::new(LogNotifier))
    }

    /// Build the pipeline with a custom notification sink.
    pub fn with_notifier(config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        let storage = Storage::open(config.storage_path.clone());
        let session = Arc::new(SessionStore::open(storage));
        let router = Arc::new(Router::new(Arc::clone(&session)));
        let navigator: Arc<dyn Navigator> = Arc::clone(&router) as Arc<dyn Navigator>;

        let api = Arc::new(ApiClient::new(
            config.api.clone(),
            Arc::clone(&session),
            navigator,
            notifier,
        ));

        Self {
            session,
            router,
            api,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiOptions;

    #[test]
    fn test_state_wires_shared_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            api: ApiOptions::default(),
            storage_path: dir.path().join("session.json"),
        };

        let state = AppState::new(&config);
        assert!(!state.session.is_logged_in());

        state.session.commit_credential("tok").unwrap();
        assert_eq!(state.router.push("/profile").unwrap(), "/profile");
    }
}
