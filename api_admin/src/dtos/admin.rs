use chrono::NaiveDateTime;
use db::models::{
    chat::{ChatMessage, ChatSession},
    user::User,
};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: String,
    pub plan: String,
    pub status: String,
    pub messages_used: i32,
    pub voice_calls_used: i32,
    pub created_at: NaiveDateTime,
}

impl From<User> for AdminUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            role: user.role,
            plan: user.subscription_plan,
            status: user.subscription_status,
            messages_used: user.ai_messages_used,
            voice_calls_used: user.voice_calls_used,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersDump {
    pub total_users: usize,
    pub users: Vec<AdminUser>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatsDump {
    pub total_chats: usize,
    pub chats: Vec<ChatSession>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesDump {
    pub total_messages: usize,
    pub messages: Vec<ChatMessage>,
}
