use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::chat::{MessageCreateRequest, SessionCreateRequest},
    models::chat::{ChatMessage, ChatSession},
};

// === SESSIONS ===

pub async fn insert_session<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: SessionCreateRequest,
) -> Res<ChatSession> {
    sqlx::query_as::<_, ChatSession>(
        r#"
        INSERT INTO chat_sessions (user_id, title, is_active)
        VALUES ($1, $2, TRUE)
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.title)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_sessions_by_user_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Vec<ChatSession>> {
    sqlx::query_as::<_, ChatSession>(
        "SELECT * FROM chat_sessions WHERE user_id = $1 ORDER BY updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// Fetches a session only if it belongs to `user_id`.
pub async fn get_owned_session<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    session_id: Uuid,
    user_id: Uuid,
) -> Res<Option<ChatSession>> {
    sqlx::query_as::<_, ChatSession>(
        "SELECT * FROM chat_sessions WHERE id = $1 AND user_id = $2",
    )
    .bind(session_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_sessions<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<ChatSession>> {
    sqlx::query_as::<_, ChatSession>("SELECT * FROM chat_sessions ORDER BY created_at")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn touch_session<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    session_id: Uuid,
    user_id: Uuid,
) -> Res<()> {
    sqlx::query("UPDATE chat_sessions SET updated_at = NOW() WHERE id = $1 AND user_id = $2")
        .bind(session_id)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn deactivate_sessions<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<()> {
    sqlx::query("UPDATE chat_sessions SET is_active = FALSE WHERE user_id = $1 AND is_active")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn activate_session<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    session_id: Uuid,
    user_id: Uuid,
) -> Res<Option<ChatSession>> {
    sqlx::query_as::<_, ChatSession>(
        r#"
        UPDATE chat_sessions
        SET is_active = TRUE, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(session_id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

// === MESSAGES ===

pub async fn insert_message<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: MessageCreateRequest,
) -> Res<ChatMessage> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        INSERT INTO chat_messages (session_id, user_id, message, is_ai)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(data.session_id)
    .bind(data.user_id)
    .bind(data.message)
    .bind(data.is_ai)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_messages_by_session_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    session_id: Uuid,
) -> Res<Vec<ChatMessage>> {
    sqlx::query_as::<_, ChatMessage>(
        "SELECT * FROM chat_messages WHERE session_id = $1 ORDER BY timestamp ASC",
    )
    .bind(session_id)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

/// The `limit` most recent messages of a session, oldest first.
pub async fn get_recent_messages<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    session_id: Uuid,
    limit: i64,
) -> Res<Vec<ChatMessage>> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT * FROM (
            SELECT * FROM chat_messages
            WHERE session_id = $1
            ORDER BY timestamp DESC
            LIMIT $2
        ) recent
        ORDER BY timestamp ASC
        "#,
    )
    .bind(session_id)
    .bind(limit)
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_messages<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<ChatMessage>> {
    sqlx::query_as::<_, ChatMessage>("SELECT * FROM chat_messages ORDER BY timestamp")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}
