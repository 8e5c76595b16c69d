use common::error::{AppError, Res};
use db::{dtos::chat::MessageCreateRequest, models::chat::ChatMessage};
use sqlx::PgPool;
use uuid::Uuid;

use crate::services::{credit, session};

/// Validated input of a message to store.
#[derive(Debug, PartialEq)]
pub struct NewMessage {
    pub session_id: Uuid,
    pub message: String,
    pub is_ai: bool,
}

pub fn validate_message(session_id: Option<Uuid>, message: &str, is_ai: bool) -> Res<NewMessage> {
    match session_id {
        Some(session_id) if !message.trim().is_empty() => Ok(NewMessage {
            session_id,
            message: message.to_string(),
            is_ai,
        }),
        _ => Err(AppError::BadRequest(
            "Missing message or sessionId".to_string(),
        )),
    }
}

/// Stores a message in a session owned by `user_id`.
///
/// Human messages consume one AI-message credit; the credit and the row are
/// written in the same transaction, so a 402 leaves no message behind.
pub async fn send_message(pool: &PgPool, user_id: Uuid, new: NewMessage) -> Res<ChatMessage> {
    let mut tx = pool.begin().await?;

    let chat_session = session::get_owned_session(&mut *tx, new.session_id, user_id).await?;

    if !new.is_ai {
        credit::consume_ai_message_credit(&mut tx, user_id).await?;
    }

    let message = db::chat::insert_message(
        &mut *tx,
        MessageCreateRequest {
            session_id: chat_session.id,
            user_id,
            message: new.message,
            is_ai: new.is_ai,
        },
    )
    .await?;
    db::chat::touch_session(&mut *tx, chat_session.id, user_id).await?;

    tx.commit().await?;
    Ok(message)
}
