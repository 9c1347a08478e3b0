//! Activity listing, participation, and admin management endpoints.

use serde::Serialize;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{
    Activity, ActivityDraft, ActivityList, MessageResponse, ParticipationResult, StatusUpdate,
};

/// Filters for GET /activities/. `None` fields are omitted from the
/// query string.
#[derive(Debug, Default, Serialize)]
pub struct ActivityQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub name: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /activities/.
pub async fn list(client: &ApiClient, query: &ActivityQuery) -> Result<ActivityList, ApiError> {
    client.get_query("/activities/", query).await
}

/// GET /activities/{id}.
pub async fn get(client: &ApiClient, id: i64) -> Result<Activity, ApiError> {
    client.get(&format!("/activities/{}", id)).await
}

/// POST /activities/{id}/participate. Joins the activity and creates
/// the reward in one step; joining twice is a client error the backend
/// reports with a message.
pub async fn participate(client: &ApiClient, id: i64) -> Result<ParticipationResult, ApiError> {
    client
        .post_empty(&format!("/activities/{}/participate", id))
        .await
}

/// POST /activities/. Admin only; new activities start as drafts.
pub async fn create(client: &ApiClient, draft: &ActivityDraft) -> Result<Activity, ApiError> {
    client.post("/activities/", draft).await
}

/// PUT /activities/{id}. Admin only.
pub async fn update(
    client: &ApiClient,
    id: i64,
    draft: &ActivityDraft,
) -> Result<Activity, ApiError> {
    client.put(&format!("/activities/{}", id), draft).await
}

/// PATCH /activities/{id}/status. Admin only; the backend validates the
/// draft/active/paused/ended lifecycle.
pub async fn set_status(client: &ApiClient, id: i64, status: &str) -> Result<Activity, ApiError> {
    let body = StatusUpdate {
        status: status.to_string(),
    };
    client
        .patch(&format!("/activities/{}/status", id), &body)
        .await
}

/// DELETE /activities/{id}. Admin only.
pub async fn delete(client: &ApiClient, id: i64) -> Result<MessageResponse, ApiError> {
    client.delete(&format!("/activities/{}", id)).await
}
