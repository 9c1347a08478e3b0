//! Session state for the Engage client.
//!
//! A single in-memory record of the signed-in user, mirrored to durable
//! storage on every mutation. Reads never touch disk after startup, so
//! the request interceptor and the navigation guard always agree on the
//! same state. The credential is zeroed in memory when the session is
//! cleared.

use std::sync::RwLock;

use zeroize::Zeroize;

use crate::api::client::ApiClient;
use crate::api::types::{Identity, LoginRequest};
use crate::api::{auth, users};
use crate::storage::{Storage, StorageError, TOKEN_KEY, USER_KEY};

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    /// User record exactly as persisted. Parsed on demand so a corrupted
    /// entry is observable as a parse failure rather than silently dropped.
    user_json: Option<String>,
}

/// Authoritative session state, rehydrated from storage once at startup.
///
/// Uses `std::sync::RwLock` because readers (the interceptor, the
/// navigation guard) are synchronous and never hold the lock across an
/// await point. Mutators keep the write lock across the storage mirror
/// write, so memory and its mirror always change together.
pub struct SessionStore {
    storage: Storage,
    inner: RwLock<SessionState>,
}

impl SessionStore {
    /// Open the store, loading any persisted session.
    ///
    /// An unreadable storage file starts the session logged out rather
    /// than failing startup.
    pub fn open(storage: Storage) -> Self {
        let load = |key: &str| match storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Failed to read stored session entry '{}': {}", key, e);
                None
            }
        };

        let state = SessionState {
            token: load(TOKEN_KEY),
            user_json: load(USER_KEY),
        };

        Self {
            storage,
            inner: RwLock::new(state),
        }
    }

    /// The bearer credential, if signed in.
    pub fn credential(&self) -> Option<String> {
        self.inner.read().unwrap().token.clone()
    }

    /// The stored user record.
    ///
    /// `Ok(None)` means no record; `Err` means a record is present but
    /// unparseable. The navigation guard treats those two differently.
    pub fn identity(&self) -> Result<Option<Identity>, serde_json::Error> {
        match self.inner.read().unwrap().user_json.as_deref() {
            Some(raw) => serde_json::from_str(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Whether a credential is currently held.
    pub fn is_logged_in(&self) -> bool {
        self.inner.read().unwrap().token.is_some()
    }

    /// Whether the stored user record carries the admin role.
    ///
    /// A missing or unparseable record is not an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self.identity(), Ok(Some(ref identity)) if identity.is_admin())
    }

    /// Store a fresh credential in memory and mirror it to storage.
    ///
    /// A failed mirror write leaves memory untouched.
    pub fn commit_credential(&self, token: &str) -> Result<(), StorageError> {
        let mut state = self.inner.write().unwrap();
        self.storage.set(TOKEN_KEY, token)?;
        state.token = Some(token.to_string());
        Ok(())
    }

    /// Store the user record in memory and mirror it to storage; on a
    /// failed mirror write the previous record stays in place.
    pub fn commit_identity(&self, identity: &Identity) -> Result<(), StorageError> {
        let raw = serde_json::to_string(identity)?;
        let mut state = self.inner.write().unwrap();
        self.storage.set(USER_KEY, &raw)?;
        state.user_json = Some(raw);
        Ok(())
    }

    /// Drop the session: the credential is zeroed in memory and both
    /// entries leave storage. The in-memory session is gone even when
    /// the storage removal fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut state = self.inner.write().unwrap();
        if let Some(ref mut token) = state.token {
            token.zeroize();
        }
        state.token = None;
        state.user_json = None;
        self.storage.remove_all(&[TOKEN_KEY, USER_KEY])
    }

    /// Sign in against the backend.
    ///
    /// The credential is committed before the profile fetch so the fetch
    /// itself goes out authenticated. Any failure, a rejected login or a
    /// credential that cannot be mirrored to storage, returns `false`
    /// and leaves existing state untouched.
    pub async fn login(&self, api: &ApiClient, username: &str, password: &str) -> bool {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = match auth::login(api, &request).await {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Login failed: {}", e);
                return false;
            }
        };

        if let Err(e) = self.commit_credential(&response.access_token) {
            log::error!("Failed to persist credential, aborting sign-in: {}", e);
            return false;
        }

        self.fetch_identity(api).await;

        log::info!("Signed in as {}", username);
        true
    }

    /// Refresh the stored user record from the backend.
    ///
    /// Failure is logged and otherwise ignored; the session stays valid
    /// on the strength of the credential alone.
    pub async fn fetch_identity(&self, api: &ApiClient) {
        match users::me(api).await {
            Ok(identity) => {
                if let Err(e) = self.commit_identity(&identity) {
                    log::error!("Failed to persist user profile: {}", e);
                }
            }
            Err(e) => {
                log::warn!("Failed to fetch user profile: {}", e);
            }
        }
    }

    /// Sign out: notify the backend, then clear local state.
    ///
    /// The local clear happens even when the server is unreachable.
    pub async fn logout(&self, api: &ApiClient) {
        if let Err(e) = auth::logout(api).await {
            log::warn!("Logout request failed (continuing local cleanup): {}", e);
        }

        if let Err(e) = self.clear() {
            log::warn!("Failed to clear stored session: {}", e);
        }

        log::info!("Signed out");
    }
}
