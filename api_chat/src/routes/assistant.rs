use std::sync::Arc;

use actix_web::{Responder, post, web};
use common::{env_config::Config, error::Res, http::Success, jwt::JwtClaims};
use sqlx::PgPool;

use crate::{
    dtos::chat::{AiResponse, AiResponseRequest},
    llm::LlmClient,
    services,
};

/// Asks the assistant for a reply within a session.
///
/// The user's message and the reply are both stored in the session; the
/// latest messages of the session are sent along as context.
///
/// # Input
/// - JSON payload `{ sessionId, userMessage }`
///
/// # Output
/// - Success: `{ aiResponse }`
/// - Error: 400, 402 and 403 as for `/send`; 500 if the completion API fails
#[post("/ai-response")]
pub async fn post_ai_response(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    llm_client: web::Data<LlmClient>,
    req: web::Json<AiResponseRequest>,
) -> Res<impl Responder> {
    let ai_response = services::assistant::respond(
        &pool,
        &llm_client,
        config.llm_config.history_limit,
        claims.user_id,
        req.session_id,
        &req.user_message,
    )
    .await?;
    Success::ok(AiResponse { ai_response })
}
