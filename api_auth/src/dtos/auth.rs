use chrono::NaiveDateTime;
use db::models::user::User;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub username: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
}

/// Usage counters against the limits of the user's plan.
/// A `None` limit means unlimited.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub plan: String,
    pub status: String,
    pub ai_messages_used: i32,
    pub ai_messages_limit: Option<i32>,
    pub voice_calls_used: i32,
    pub voice_calls_limit: Option<i32>,
    pub trial_start_date: Option<NaiveDateTime>,
    pub trial_end_date: Option<NaiveDateTime>,
}
