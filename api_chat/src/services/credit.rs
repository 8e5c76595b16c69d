use common::{
    error::{AppError, Res},
    plan::SubscriptionPlan,
};
use db::models::user::User;
use sqlx::PgConnection;
use uuid::Uuid;

/// Consumes one AI-message credit of `user_id`.
///
/// The plan is read first to find the limit; the counter itself is checked
/// and incremented in one UPDATE. Returns 402 when the limit is reached.
pub async fn consume_ai_message_credit(conn: &mut PgConnection, user_id: Uuid) -> Res<User> {
    let user = db::user::get_user_by_id(&mut *conn, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    let limit = SubscriptionPlan::parse(&user.subscription_plan).ai_messages_limit();

    match db::user::consume_ai_message_credit(&mut *conn, user_id, limit).await? {
        Some(updated) => Ok(updated),
        None => {
            log::info!(
                "User {} reached the AI message limit of plan {}",
                user_id,
                user.subscription_plan
            );
            Err(AppError::PaymentRequired("No credits left".to_string()))
        }
    }
}
