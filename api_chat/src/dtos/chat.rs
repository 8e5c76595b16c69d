use common::error::{AppError, Res};
use db::models::chat::{ChatMessage, ChatSession};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    pub title: Option<String>,
}

impl CreateSessionRequest {
    /// An empty body means no title; anything else must be valid JSON.
    pub fn from_body(body: &[u8]) -> Res<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: ChatSession,
}

#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<ChatSession>,
}

#[derive(Debug, Serialize)]
pub struct SessionDetailResponse {
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_ai: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResponseRequest {
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub user_message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResponse {
    pub ai_response: String,
}
