//! Authentication endpoints.
//!
//! These are the only calls that legitimately run without a credential
//! attached; everything else goes out authenticated or gets bounced by
//! the backend.

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{
    LoginRequest, MessageResponse, RegisterRequest, RegisterResponse, TokenResponse,
};

/// POST /auth/login. Exchanges username/password for a bearer token.
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
    client.post("/auth/login", request).await
}

/// POST /auth/register. Creates an account; does not sign the user in.
pub async fn register(
    client: &ApiClient,
    request: &RegisterRequest,
) -> Result<RegisterResponse, ApiError> {
    client.post("/auth/register", request).await
}

/// POST /auth/logout. Advisory only; the caller clears local state
/// whether or not this call succeeds.
pub async fn logout(client: &ApiClient) -> Result<MessageResponse, ApiError> {
    client.post_empty("/auth/logout").await
}
