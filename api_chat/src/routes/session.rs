use std::sync::Arc;

use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    dtos::chat::{
        CreateSessionRequest, SessionDetailResponse, SessionListResponse, SessionResponse,
    },
    services,
};

/// Starts a new chat session for the authenticated user.
///
/// # Input
/// - optional JSON payload `{ title? }`; a missing body or blank title yields "New Chat"
/// - Error: 400 for a body that is not valid JSON
///
/// # Output
/// - Success: `{ session }`
///
/// # Frontend Example
/// ```javascript
/// const res = await fetch('/api/chat/sessions', {
///   method: 'POST',
///   headers: {
///     'Authorization': `Bearer ${token}`,
///     'Content-Type': 'application/json'
///   },
///   body: JSON.stringify({ title: 'Q3 outreach' })
/// });
/// const { session } = await res.json();
/// ```
#[post("/sessions")]
pub async fn post_session(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    body: web::Bytes,
) -> Res<impl Responder> {
    let req = CreateSessionRequest::from_body(&body)?;
    let session =
        services::session::create_session(&pool, claims.user_id, req.title.as_deref()).await?;
    Success::ok(SessionResponse { session })
}

/// Lists the caller's sessions, most recently updated first.
#[get("/sessions")]
pub async fn get_sessions(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let sessions = services::session::get_sessions(&pool, claims.user_id).await?;
    Success::ok(SessionListResponse { sessions })
}

/// Returns one of the caller's sessions with its messages in chronological order.
///
/// # Output
/// - Success: `{ session, messages }`
/// - Error: 403 Forbidden if the session does not exist or belongs to someone else
#[get("/sessions/{session_id}")]
pub async fn get_session(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let (session, messages) =
        services::session::get_session_with_messages(&pool, path.into_inner(), claims.user_id)
            .await?;
    Success::ok(SessionDetailResponse { session, messages })
}

/// Marks the session active and every other session of the caller inactive.
#[post("/sessions/{session_id}/activate")]
pub async fn post_activate(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    path: web::Path<Uuid>,
) -> Res<impl Responder> {
    let session =
        services::session::activate_session(&pool, path.into_inner(), claims.user_id).await?;
    Success::ok(SessionResponse { session })
}
