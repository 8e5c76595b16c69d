use common::error::{AppError, Res};
use db::{
    dtos::chat::SessionCreateRequest,
    models::chat::{ChatMessage, ChatSession},
};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::dtos::chat::DEFAULT_SESSION_TITLE;

pub fn session_not_found() -> AppError {
    AppError::Forbidden("Session not found".to_string())
}

/// Falls back to "New Chat" for a missing or blank title.
pub fn session_title(title: Option<&str>) -> String {
    title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_SESSION_TITLE)
        .to_string()
}

pub async fn create_session(pool: &PgPool, user_id: Uuid, title: Option<&str>) -> Res<ChatSession> {
    db::chat::insert_session(
        pool,
        SessionCreateRequest {
            user_id,
            title: session_title(title),
        },
    )
    .await
}

pub async fn get_sessions(pool: &PgPool, user_id: Uuid) -> Res<Vec<ChatSession>> {
    db::chat::get_sessions_by_user_id(pool, user_id).await
}

/// Loads a session owned by `user_id`; anyone else gets 403.
pub async fn get_owned_session<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    session_id: Uuid,
    user_id: Uuid,
) -> Res<ChatSession> {
    db::chat::get_owned_session(executor, session_id, user_id)
        .await?
        .ok_or_else(session_not_found)
}

pub async fn get_session_with_messages(
    pool: &PgPool,
    session_id: Uuid,
    user_id: Uuid,
) -> Res<(ChatSession, Vec<ChatMessage>)> {
    let session = get_owned_session(pool, session_id, user_id).await?;
    let messages = db::chat::get_messages_by_session_id(pool, session.id).await?;
    Ok((session, messages))
}

/// Makes `session_id` the caller's only active session.
pub async fn activate_session(pool: &PgPool, session_id: Uuid, user_id: Uuid) -> Res<ChatSession> {
    let mut tx = pool.begin().await?;
    get_owned_session(&mut *tx, session_id, user_id).await?;
    db::chat::deactivate_sessions(&mut *tx, user_id).await?;
    let session = db::chat::activate_session(&mut *tx, session_id, user_id)
        .await?
        .ok_or_else(session_not_found)?;
    tx.commit().await?;
    Ok(session)
}
