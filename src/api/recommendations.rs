//! Personalized recommendation endpoints.

use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{Feedback, MessageResponse, Recommendation, RecommendationStats};

/// GET /recommendations/. Scored activities for the current user,
/// best first. `refresh` forces the backend to rescore instead of
/// serving cached recommendations.
pub async fn list(
    client: &ApiClient,
    limit: u32,
    refresh: bool,
) -> Result<Vec<Recommendation>, ApiError> {
    client
        .get_query(
            "/recommendations/",
            &[("limit", limit.to_string()), ("refresh", refresh.to_string())],
        )
        .await
}

/// POST /recommendations/{activity_id}/feedback.
pub async fn feedback(
    client: &ApiClient,
    activity_id: i64,
    feedback: &Feedback,
) -> Result<MessageResponse, ApiError> {
    client
        .post(&format!("/recommendations/{}/feedback", activity_id), feedback)
        .await
}

/// POST /recommendations/{activity_id}/click. Shorthand feedback for a
/// click without acceptance.
pub async fn click(client: &ApiClient, activity_id: i64) -> Result<MessageResponse, ApiError> {
    client
        .post_empty(&format!("/recommendations/{}/click", activity_id))
        .await
}

/// POST /recommendations/{activity_id}/accept. Shorthand feedback for
/// an accepted recommendation.
pub async fn accept(client: &ApiClient, activity_id: i64) -> Result<MessageResponse, ApiError> {
    client
        .post_empty(&format!("/recommendations/{}/accept", activity_id))
        .await
}

/// GET /recommendations/explain/{activity_id}. Score breakdown and
/// feature importances for one recommendation; shape is display-only.
pub async fn explain(client: &ApiClient, activity_id: i64) -> Result<Value, ApiError> {
    client
        .get(&format!("/recommendations/explain/{}", activity_id))
        .await
}

/// GET /recommendations/stats.
pub async fn stats(client: &ApiClient) -> Result<RecommendationStats, ApiError> {
    client.get("/recommendations/stats").await
}
