//! User profile and questionnaire endpoints.

use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{
    Identity, MessageResponse, Preferences, QuestionnaireResult, QuestionnaireSubmit,
};

/// GET /users/me. The record the session store persists.
pub async fn me(client: &ApiClient) -> Result<Identity, ApiError> {
    client.get("/users/me").await
}

/// GET /users/profile. Behavioral factor scores and cluster assignment.
pub async fn profile(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/users/profile").await
}

/// PUT /users/profile. Partial update of the factor profile.
pub async fn update_profile(client: &ApiClient, updates: &Value) -> Result<Value, ApiError> {
    client.put("/users/profile", updates).await
}

/// POST /users/questionnaire. Twenty answers, scored server-side into
/// the six-factor profile.
pub async fn submit_questionnaire(
    client: &ApiClient,
    submission: &QuestionnaireSubmit,
) -> Result<QuestionnaireResult, ApiError> {
    client.post("/users/questionnaire", submission).await
}

/// PUT /users/me/preferences.
pub async fn update_preferences(
    client: &ApiClient,
    preferences: &Preferences,
) -> Result<MessageResponse, ApiError> {
    client.put("/users/me/preferences", preferences).await
}
