use actix_web::web;
use middleware::auth::AuthMiddleware;

pub mod routes {
    pub mod auth;
    pub mod user;
}
pub mod middleware {
    pub mod auth;
}
pub mod services {
    pub mod auth;
    pub mod user;
}
pub mod dtos {
    pub mod auth;
}

/// `/auth`: registration, login and the token owner's profile.
pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::post_register)
        .service(routes::auth::post_login)
        .service(routes::user::get_me)
}

/// `/user`: account data of the token owner. Mount behind `auth_middleware`.
pub fn mount_user() -> actix_web::Scope {
    web::scope("/user").service(routes::user::get_subscription)
}

/// Rejects requests without a valid bearer token and exposes the claims as
/// `web::ReqData<JwtClaims>` to the handlers behind it.
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}
