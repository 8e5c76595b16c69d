use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: String,
    pub subscription_plan: String,
    pub subscription_status: String,
    pub ai_messages_used: i32,
    pub voice_calls_used: i32,
    pub trial_start_date: Option<NaiveDateTime>,
    pub trial_end_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthCredentials {
    pub user_id: Uuid,
    pub password_hash: String,
}
