use actix_web::web;

pub mod llm;

pub mod routes {
    pub mod assistant;
    pub mod message;
    pub mod session;
}
pub mod services {
    pub mod assistant;
    pub mod credit;
    pub mod message;
    pub mod session;
}
pub mod dtos {
    pub mod chat;
}

/// `/chat`: sessions, messages and the assistant proxy.
/// Mount behind `api_auth::auth_middleware`; every handler reads the caller
/// from `web::ReqData<JwtClaims>` and an `LlmClient` from app data.
pub fn mount_chat() -> actix_web::Scope {
    web::scope("/chat")
        .service(routes::session::post_session)
        .service(routes::session::get_sessions)
        .service(routes::session::get_session)
        .service(routes::session::post_activate)
        .service(routes::message::post_send)
        .service(routes::assistant::post_ai_response)
}
