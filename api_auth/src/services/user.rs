use chrono::{Duration, Utc};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::plan::{INITIAL_SUBSCRIPTION_STATUS, Role, SubscriptionPlan, TRIAL_DAYS};
use db::dtos::user::UserCreateRequest;
use db::models::user::{AuthCredentials, User};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dtos::auth::SubscriptionResponse;
use crate::services::auth::{self, NewAccount};

pub async fn exists_user_by_email(pool: &PgPool, email: &str) -> Res<bool> {
    db::user::exists_user_by_email(pool, email).await
}

/// Loads the token owner. A token for a user that no longer exists is 401.
pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Res<User> {
    db::user::get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))
}

/// Inserts user record and credentials to the database.
/// New accounts start on the starter plan with a pending trial.
pub async fn create_user_with_credentials(
    pool: &PgPool,
    account: NewAccount,
    config: &Config,
) -> Res<User> {
    // hash before opening the transaction
    let password_hash = auth::hash_password(&account.password)?;

    let role = if config.is_admin_email(&account.email) {
        Role::Admin
    } else {
        Role::User
    };
    let trial_start_date = Utc::now().naive_utc();
    let trial_end_date = trial_start_date + Duration::days(TRIAL_DAYS);

    let mut tx = pool.begin().await?;

    // insert user
    let user = db::user::insert_user(
        &mut *tx,
        UserCreateRequest {
            email: account.email,
            username: account.username,
            role: role.as_str().to_string(),
            subscription_plan: SubscriptionPlan::default().as_str().to_string(),
            subscription_status: INITIAL_SUBSCRIPTION_STATUS.to_string(),
            trial_start_date,
            trial_end_date,
        },
    )
    .await
    .map_err(|e| match e {
        // lost a race with a concurrent registration of the same email
        AppError::Database(sqlx::Error::Database(ref db_err)) if db_err.is_unique_violation() => {
            AppError::BadRequest("Email is already registered".to_string())
        }
        other => other,
    })?;

    // insert credentials
    db::user::insert_user_with_credentials(
        &mut *tx,
        AuthCredentials {
            user_id: user.id,
            password_hash,
        },
    )
    .await?;

    tx.commit().await?;
    log::info!("Registered user {} ({})", user.id, role.as_str());
    Ok(user)
}

pub fn subscription_summary(user: &User) -> SubscriptionResponse {
    let plan = SubscriptionPlan::parse(&user.subscription_plan);
    SubscriptionResponse {
        plan: plan.as_str().to_string(),
        status: user.subscription_status.clone(),
        ai_messages_used: user.ai_messages_used,
        ai_messages_limit: plan.ai_messages_limit(),
        voice_calls_used: user.voice_calls_used,
        voice_calls_limit: plan.voice_calls_limit(),
        trial_start_date: user.trial_start_date,
        trial_end_date: user.trial_end_date,
    }
}
