use common::error::Res;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    llm::{self, LlmClient},
    services::message::{self, NewMessage},
};

/// Stores the user's message, replays the latest `history_limit` messages of
/// the session to the completion API and stores the reply.
///
/// On success exactly two rows are added. If the completion call fails the
/// user's message stays stored and the error is returned.
pub async fn respond(
    pool: &PgPool,
    llm_client: &LlmClient,
    history_limit: i64,
    user_id: Uuid,
    session_id: Option<Uuid>,
    user_message: &str,
) -> Res<String> {
    let new = message::validate_message(session_id, user_message, false)?;
    let session_id = new.session_id;

    // ownership check, credit and user message
    message::send_message(pool, user_id, new).await?;

    let history = db::chat::get_recent_messages(pool, session_id, history_limit).await?;
    let reply = llm_client.complete(&llm::build_context(&history)).await?;

    message::send_message(
        pool,
        user_id,
        NewMessage {
            session_id,
            message: reply.clone(),
            is_ai: true,
        },
    )
    .await?;

    Ok(reply)
}
