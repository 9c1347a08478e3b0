//! Request and response types for the Engage backend API.
//!
//! The backend serializes snake_case JSON throughout; the camelCase
//! holdouts (reward summary, preference keys) are renamed explicitly.
//! Timestamps stay opaque ISO-8601 strings since the client never
//! computes with them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Role string that grants access to the admin console routes.
pub const ADMIN_ROLE: &str = "admin";

/// Money fields arrive as JSON numbers from handler-built dicts and as
/// strings from Decimal-typed response schemas. Accept both.
mod amount {
    use super::*;

    pub fn required<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| serde::de::Error::custom("amount out of range")),
            Value::String(s) => s.parse().map_err(serde::de::Error::custom),
            Value::Null => Ok(0.0),
            other => Err(serde::de::Error::custom(format!(
                "invalid amount: {}",
                other
            ))),
        }
    }

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| serde::de::Error::custom("amount out of range"))
                .map(Some),
            Value::String(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
            other => Err(serde::de::Error::custom(format!(
                "invalid amount: {}",
                other
            ))),
        }
    }
}

/// Login request body sent to POST /auth/login.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response: the bearer credential for subsequent requests.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Registration request body sent to POST /auth/register.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Registration acknowledgement with the new account's id.
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

/// Plain acknowledgement body returned by several mutating endpoints.
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Notification and recommendation preferences on the user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub frequency: String,
    pub activity_types: Vec<String>,
    pub incentive_types: Vec<String>,
}

/// The authenticated user record from GET /users/me.
///
/// Persisted in durable storage alongside the credential; the
/// navigation guard only ever inspects `role`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<i32>,
    pub cluster_tag: Option<String>,
    pub questionnaire_completed: Option<i32>,
    pub created_at: Option<String>,
    pub preferences: Option<Preferences>,
}

impl Identity {
    /// Whether this identity carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// A platform activity as listed and recommended to users.
#[derive(Debug, Clone, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub incentive_type: Option<String>,
    #[serde(default, deserialize_with = "amount::optional")]
    pub incentive_amount: Option<f64>,
    pub target_cluster: Option<String>,
    pub status: Option<String>,
    pub view_count: Option<i64>,
    pub participate_count: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Paged activity listing from GET /activities/.
#[derive(Debug, Deserialize)]
pub struct ActivityList {
    pub total: i64,
    pub items: Vec<Activity>,
    pub page: i64,
    pub page_size: i64,
}

/// Activity payload for admin create/update calls.
///
/// The backend applies updates with unset-field semantics: a key that is
/// present but null overwrites the stored value. Unset fields are
/// therefore omitted from the body entirely.
#[derive(Debug, Default, Serialize)]
pub struct ActivityDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incentive_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incentive_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_cluster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// Status transition body for PATCH /activities/{id}/status.
#[derive(Debug, Serialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Result of POST /activities/{id}/participate.
#[derive(Debug, Deserialize)]
pub struct ParticipationResult {
    pub message: String,
    pub reward: Reward,
}

/// One scored recommendation from GET /recommendations/.
#[derive(Debug, Clone, Deserialize)]
pub struct Recommendation {
    pub activity_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub incentive_type: Option<String>,
    #[serde(default)]
    pub incentive_amount: f64,
    pub score: f64,
    pub reason: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Feedback body for POST /recommendations/{id}/feedback.
#[derive(Debug, Default, Serialize)]
pub struct Feedback {
    pub is_clicked: bool,
    pub is_accepted: bool,
}

/// Per-user recommendation statistics from GET /recommendations/stats.
#[derive(Debug, Deserialize)]
pub struct RecommendationStats {
    pub total_recommendations: i64,
    pub click_rate: f64,
    pub accept_rate: f64,
    #[serde(default)]
    pub top_features: Vec<Value>,
}

/// Questionnaire answers for POST /users/questionnaire.
#[derive(Debug, Serialize)]
pub struct QuestionnaireSubmit {
    pub answers: Vec<i32>,
}

/// Questionnaire acknowledgement carrying the recomputed profile.
#[derive(Debug, Deserialize)]
pub struct QuestionnaireResult {
    pub message: String,
    pub profile: Option<Value>,
}

/// One reward entry from GET /rewards/.
#[derive(Debug, Clone, Deserialize)]
pub struct Reward {
    pub id: i64,
    pub user_id: i64,
    pub activity_id: i64,
    pub reward_type: String,
    #[serde(default, deserialize_with = "amount::required")]
    pub amount: f64,
    pub status: String,
    pub created_at: Option<String>,
    pub activity_name: Option<String>,
}

/// Paged reward listing from GET /rewards/.
#[derive(Debug, Deserialize)]
pub struct RewardList {
    pub total: i64,
    pub items: Vec<Reward>,
    pub page: i64,
    pub page_size: i64,
}

/// Aggregate reward totals from GET /rewards/summary.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardSummary {
    pub total_amount: f64,
    pub total_points: i64,
    pub pending_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_round_trip() {
        let json = r#"{
            "id": 7,
            "username": "dana",
            "role": "admin",
            "email": "dana@example.com",
            "phone": null,
            "status": 1,
            "cluster_tag": "early_adopter",
            "questionnaire_completed": 1,
            "created_at": "2024-05-01T00:00:00",
            "preferences": {
                "frequency": "daily",
                "activityTypes": ["sports"],
                "incentiveTypes": ["points"]
            }
        }"#;

        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.id, 7);
        assert!(identity.is_admin());
        assert_eq!(
            identity.preferences.as_ref().unwrap().activity_types,
            vec!["sports"]
        );

        let back = serde_json::to_string(&identity).unwrap();
        let again: Identity = serde_json::from_str(&back).unwrap();
        assert_eq!(identity, again);
    }

    #[test]
    fn test_identity_tolerates_unknown_fields() {
        let json = r#"{
            "id": 3,
            "username": "lee",
            "role": "user",
            "email": null,
            "phone": null,
            "status": 1,
            "cluster_tag": null,
            "questionnaire_completed": 0,
            "created_at": null,
            "preferences": null,
            "avatar": "lee.png"
        }"#;

        let identity: Identity = serde_json::from_str(json).unwrap();
        assert!(!identity.is_admin());
        assert_eq!(identity.username, "lee");
    }

    #[test]
    fn test_activity_type_field_renamed() {
        let json = r#"{
            "id": 1,
            "title": "Evening run",
            "description": null,
            "type": "sports",
            "incentive_type": "points",
            "incentive_amount": 20.0,
            "target_cluster": null,
            "status": "active",
            "view_count": 5,
            "participate_count": 2,
            "start_time": null,
            "end_time": null
        }"#;

        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.kind.as_deref(), Some("sports"));
        assert_eq!(activity.incentive_amount, Some(20.0));
    }

    #[test]
    fn test_amounts_accept_decimal_strings() {
        let json = r#"{
            "id": 9,
            "user_id": 3,
            "activity_id": 1,
            "reward_type": "red_packet",
            "amount": "12.50",
            "status": "pending",
            "created_at": "2024-06-01T10:00:00",
            "activity_name": "Evening run"
        }"#;

        let reward: Reward = serde_json::from_str(json).unwrap();
        assert_eq!(reward.amount, 12.5);

        let numeric = r#"{
            "id": 9,
            "user_id": 3,
            "activity_id": 1,
            "reward_type": "points",
            "amount": 30,
            "status": "completed",
            "created_at": null,
            "activity_name": null
        }"#;

        let reward: Reward = serde_json::from_str(numeric).unwrap();
        assert_eq!(reward.amount, 30.0);
    }

    #[test]
    fn test_reward_summary_is_camel_case() {
        let json = r#"{"totalAmount": 12.5, "totalPoints": 340, "pendingCount": 2}"#;
        let summary: RewardSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_points, 340);
        assert_eq!(summary.pending_count, 2);
    }

    #[test]
    fn test_activity_draft_omits_unset_fields() {
        let draft = ActivityDraft {
            title: Some("Spring trail run".to_string()),
            incentive_amount: Some(15.0),
            ..Default::default()
        };

        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "Spring trail run", "incentive_amount": 15.0})
        );
    }
}
