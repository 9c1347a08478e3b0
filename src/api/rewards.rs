//! Reward listing and claiming endpoints.

use serde::Serialize;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{MessageResponse, RewardList, RewardSummary};

/// Filters for GET /rewards/.
#[derive(Debug, Default, Serialize)]
pub struct RewardQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub reward_type: Option<String>,
    pub status: Option<String>,
}

/// GET /rewards/. The current user's rewards, newest first.
pub async fn list(client: &ApiClient, query: &RewardQuery) -> Result<RewardList, ApiError> {
    client.get_query("/rewards/", query).await
}

/// GET /rewards/summary.
pub async fn summary(client: &ApiClient) -> Result<RewardSummary, ApiError> {
    client.get("/rewards/summary").await
}

/// POST /rewards/{id}/claim. Only pending rewards can be claimed.
pub async fn claim(client: &ApiClient, id: i64) -> Result<MessageResponse, ApiError> {
    client.post_empty(&format!("/rewards/{}/claim", id)).await
}
