use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::user::UserCreateRequest,
    models::user::{AuthCredentials, User},
};

#[derive(sqlx::FromRow)]
struct UserWithCredentials {
    #[sqlx(flatten)]
    user: User,
    password_hash: String,
}

pub async fn exists_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_users<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<Vec<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: UserCreateRequest,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (email, username, role, subscription_plan, subscription_status, trial_start_date, trial_end_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(data.email)
    .bind(data.username)
    .bind(data.role)
    .bind(data.subscription_plan)
    .bind(data.subscription_status)
    .bind(data.trial_start_date)
    .bind(data.trial_end_date)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_user_with_credentials<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: AuthCredentials,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO auth_credentials (user_id, password_hash)
        VALUES ($1, $2)
        "#,
    )
    .bind(data.user_id)
    .bind(data.password_hash)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_user_with_password_hash<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Option<(User, AuthCredentials)>> {
    sqlx::query_as::<_, UserWithCredentials>(
        r#"
        SELECT u.*, ac.password_hash
        FROM users u
        JOIN auth_credentials ac ON u.id = ac.user_id
        WHERE u.email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await
    .map(|record| {
        record.map(|record| {
            let credentials = AuthCredentials {
                user_id: record.user.id,
                password_hash: record.password_hash,
            };
            (record.user, credentials)
        })
    })
    .map_err(AppError::from)
}

/// Increments the AI message counter in a single statement, but only while
/// it is below `limit` (`None` means unlimited).
/// Returns `None` when the user has no credits left.
pub async fn consume_ai_message_credit<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    limit: Option<i32>,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET ai_messages_used = ai_messages_used + 1, updated_at = NOW()
        WHERE id = $1 AND ($2::INTEGER IS NULL OR ai_messages_used < $2)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}
