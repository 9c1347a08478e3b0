//! Admin console endpoints.
//!
//! Dashboard, analysis, and model payloads are chart-shaped and
//! display-only, so they stay as raw JSON values instead of growing a
//! struct per widget.

use serde::Serialize;
use serde_json::{json, Value};

use super::client::ApiClient;
use super::error::ApiError;
use super::types::MessageResponse;

/// Filters for GET /admin/logs.
#[derive(Debug, Default, Serialize)]
pub struct LogQuery {
    pub level: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// GET /admin/dashboard. Headline counts plus chart series.
pub async fn dashboard(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/dashboard").await
}

/// GET /admin/users.
pub async fn users(client: &ApiClient, page: u32, page_size: u32) -> Result<Value, ApiError> {
    client
        .get_query(
            "/admin/users",
            &[("page", page.to_string()), ("page_size", page_size.to_string())],
        )
        .await
}

/// PUT /admin/users/{id}/status. `status` rides in the query string.
pub async fn set_user_status(
    client: &ApiClient,
    user_id: i64,
    status: i32,
) -> Result<MessageResponse, ApiError> {
    client
        .put_query(
            &format!("/admin/users/{}/status", user_id),
            &[("status", status)],
        )
        .await
}

/// GET /admin/users/stats.
pub async fn user_stats(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/users/stats").await
}

/// GET /admin/activities/stats.
pub async fn activity_stats(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/activities/stats").await
}

/// GET /admin/potential-analysis.
pub async fn potential_analysis(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/potential-analysis").await
}

/// GET /admin/dimension-strategies.
pub async fn dimension_strategies(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/dimension-strategies").await
}

/// GET /admin/config. Recommendation engine tuning knobs.
pub async fn config(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/config").await
}

/// PUT /admin/config.
pub async fn update_config(client: &ApiClient, config: &Value) -> Result<Value, ApiError> {
    client.put("/admin/config", config).await
}

/// GET /admin/model/info.
pub async fn model_info(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/model/info").await
}

/// POST /admin/model/train. Kicks off retraining; completion is
/// observed via model info, not this call.
pub async fn train_model(client: &ApiClient) -> Result<MessageResponse, ApiError> {
    client.post_empty("/admin/model/train").await
}

/// GET /admin/clusters.
pub async fn clusters(client: &ApiClient) -> Result<Value, ApiError> {
    client.get("/admin/clusters").await
}

/// POST /admin/clusters/rebuild.
pub async fn rebuild_clusters(client: &ApiClient, n_clusters: u32) -> Result<Value, ApiError> {
    client
        .post("/admin/clusters/rebuild", &json!({ "n_clusters": n_clusters }))
        .await
}

/// GET /admin/logs.
pub async fn logs(client: &ApiClient, query: &LogQuery) -> Result<Value, ApiError> {
    client.get_query("/admin/logs", query).await
}
