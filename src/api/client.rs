//! HTTP client with bearer injection, envelope unwrapping, and shared
//! error handling.
//!
//! Every request funnels through [`ApiClient::execute`]. The credential
//! is attached from session state and failures surface one user-facing
//! notice each; a 401 additionally clears the session and forces a
//! single redirect to sign-in no matter how many requests expire at
//! once.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::redirect::RedirectGuard;
use crate::notify::Notifier;
use crate::router::{Navigator, LOGIN_PATH};
use crate::session::SessionStore;

/// Fallback when an error response carries no usable message.
const REQUEST_FAILED_NOTICE: &str = "Request failed";
/// Notice for transport-level failures.
const NETWORK_ERROR_NOTICE: &str = "Network error, please try again later";
/// Notice shown once per session-expiry episode.
const SESSION_EXPIRED_NOTICE: &str = "Session expired, please sign in again";

/// Connection knobs for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiOptions {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api/v1".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client wrapper for Engage API communication.
///
/// Reads the credential from the session store on every request, so a
/// login or logout is visible to the next request without any client
/// reconfiguration.
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    redirect: RedirectGuard,
}

impl ApiClient {
    /// Create a new API client against `options.base_url`.
    pub fn new(
        options: ApiOptions,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let client = Client::builder()
            .timeout(options.timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            session,
            navigator,
            notifier,
            redirect: RedirectGuard::new(),
        }
    }

    /// Send a GET request to a relative API path.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// Send a GET request with query parameters.
    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        self.execute(self.request(Method::GET, path).query(query)).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    /// Send a POST request with no body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::POST, path)).await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    /// Send a PATCH request with a JSON body.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.request(Method::PATCH, path).json(body)).await
    }

    /// Send a PUT request carrying only query parameters.
    pub async fn put_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        self.execute(self.request(Method::PUT, path).query(query)).await
    }

    /// Send a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Run one request through the full pipeline: attach the credential,
    /// classify the response, unwrap the body envelope.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = match self.session.credential() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Request failed to send: {}", e);
                self.notifier.error(NETWORK_ERROR_NOTICE);
                return Err(ApiError::Network(e));
            }
        };

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized().await;
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let message = error_message(&parsed);
            log::warn!("Request failed with status {}: {}", status, message);
            self.notifier.error(&message);
            return Err(ApiError::Status { status, message });
        }

        let body = response.text().await.map_err(ApiError::Network)?;
        let parsed: Value = serde_json::from_str(&body)?;

        let data = match unwrap_envelope(parsed) {
            Ok(data) => data,
            Err(e) => {
                if let ApiError::Application(ref message) = e {
                    self.notifier.error(message);
                }
                return Err(e);
            }
        };

        Ok(serde_json::from_value(data)?)
    }

    /// Shared 401 handling.
    ///
    /// The first expired request claims the redirect episode, clears the
    /// session, tells the user once, and pushes to sign-in. Requests
    /// racing in behind it, or expiring while the user is already on the
    /// sign-in page, just fail. The claim is released when the episode
    /// guard drops, whether or not the navigation succeeded.
    async fn handle_unauthorized(&self) {
        if self.navigator.location() == LOGIN_PATH {
            return;
        }

        let Some(_episode) = self.redirect.try_begin() else {
            return;
        };

        log::info!("Session expired, redirecting to sign-in");

        if let Err(e) = self.session.clear() {
            log::warn!("Failed to clear stored session: {}", e);
        }

        self.notifier.error(SESSION_EXPIRED_NOTICE);

        if let Err(e) = self.navigator.navigate(LOGIN_PATH).await {
            log::warn!("Redirect to sign-in failed: {}", e);
        }
    }
}

/// Unwrap the `{code, message, data}` envelope some endpoints use.
///
/// A body is an envelope iff it is an object with a `code` key. Code 200
/// or 0 yields `data`, or the whole envelope when `data` is absent; any
/// other code is an application-level failure carrying the envelope's
/// message. Bodies without a `code` key pass through untouched.
fn unwrap_envelope(body: Value) -> Result<Value, ApiError> {
    match body {
        Value::Object(map) if map.contains_key("code") => {
            let code = map.get("code").and_then(Value::as_i64);
            if matches!(code, Some(200) | Some(0)) {
                match map.get("data") {
                    Some(data) if !data.is_null() => Ok(data.clone()),
                    _ => Ok(Value::Object(map)),
                }
            } else {
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or(REQUEST_FAILED_NOTICE)
                    .to_string();
                Err(ApiError::Application(message))
            }
        }
        other => Ok(other),
    }
}

/// Pick the user-facing message out of an error response body.
///
/// Server `message` wins, then `detail` (FastAPI's field; validation
/// errors arrive as a non-string and are shown serialized), then a
/// generic fallback.
fn error_message(body: &Value) -> String {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return message.to_string();
    }

    match body.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(detail) if !detail.is_null() => detail.to_string(),
        _ => REQUEST_FAILED_NOTICE.to_string(),
    }
}
