use std::sync::Arc;

use actix_web::{Responder, post, web};
use common::{error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;

use crate::{
    dtos::chat::{MessageResponse, SendMessageRequest},
    services,
};

/// Saves a message to one of the caller's sessions.
///
/// # Input
/// - JSON payload `{ sessionId, message, isAi }`
///
/// # Output
/// - Success: `{ message }`
/// - Error: 400 for a missing sessionId/message, 403 if the session is not the caller's,
///   402 Payment Required when a human message finds no credits left
///
/// # Frontend Example
/// ```javascript
/// const res = await fetch('/api/chat/send', {
///   method: 'POST',
///   headers: {
///     'Authorization': `Bearer ${token}`,
///     'Content-Type': 'application/json'
///   },
///   body: JSON.stringify({ sessionId, message: 'Draft a follow-up mail', isAi: false })
/// });
/// if (res.status === 402) showUpgradeDialog();
/// ```
#[post("/send")]
pub async fn post_send(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    req: web::Json<SendMessageRequest>,
) -> Res<impl Responder> {
    let req = req.into_inner();
    let new = services::message::validate_message(req.session_id, &req.message, req.is_ai)?;
    let message = services::message::send_message(&pool, claims.user_id, new).await?;
    Success::ok(MessageResponse { message })
}
