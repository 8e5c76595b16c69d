use actix_web::web;
use middleware::admin::AdminMiddleware;

pub mod routes {
    pub mod admin;
}
pub mod middleware {
    pub mod admin;
}
mod dtos {
    pub(crate) mod admin;
}

/// `/admin`: full table dumps.
/// Wrap with `admin_middleware()` first and `api_auth::auth_middleware()`
/// last, so the token is checked before the role.
pub fn mount_admin() -> actix_web::Scope {
    web::scope("/admin")
        .service(routes::admin::get_users)
        .service(routes::admin::get_chats)
        .service(routes::admin::get_messages)
}

pub fn admin_middleware() -> AdminMiddleware {
    AdminMiddleware::new()
}
