use std::sync::Arc;

use actix_web::{Responder, get, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;

use crate::{dtos::auth::MeResponse, services};

/// Endpoint to retrieve the current authenticated user's information.
///
/// This handler extracts the user ID from the authentication claims and fetches
/// the corresponding user record from the database. The password hash lives
/// in a separate table and is never part of the response.
///
/// # Output
/// - Success: `{ user }`
/// - Error: 401 Unauthorized if no valid token is provided or the user no longer exists
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/auth/me', {
///   headers: {
///     'Authorization': `Bearer ${localStorage.getItem('authToken')}`
///   }
/// });
/// ```
#[get("/me", wrap = "crate::auth_middleware()")]
pub async fn get_me(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let user = services::user::get_user_by_id(pg_pool, claims.user_id).await?;
    Success::ok(MeResponse { user })
}

/// Usage of the current plan: messages and voice calls used against their limits.
#[get("/subscription")]
pub async fn get_subscription(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let user = services::user::get_user_by_id(pg_pool, claims.user_id).await?;
    Success::ok(services::user::subscription_summary(&user))
}
