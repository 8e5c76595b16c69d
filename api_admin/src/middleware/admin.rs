use std::{future::Future, pin::Pin, rc::Rc, sync::Arc};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use common::{
    error::AppError,
    jwt::{self, JwtClaims},
    plan::Role,
};
use futures::future::{Ready, ok};
use sqlx::PgPool;

/// Lets a request through only when the token's user has the admin role.
/// The role is read from the database on every request, so revoking it
/// takes effect without waiting for tokens to expire.
pub struct AdminMiddleware {}

impl AdminMiddleware {
    pub fn new() -> Self {
        AdminMiddleware {}
    }
}

impl Default for AdminMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AdminMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AdminMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AdminMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Rc::clone(&self.service);

        Box::pin(async move {
            let guarded = req.extensions().get::<JwtClaims>().cloned();
            let claims = match guarded {
                Some(claims) => Ok(claims),
                None => jwt::get_jwt_claims_or_error(&req),
            };
            let claims = match claims {
                Ok(claims) => claims,
                Err(response) => return Ok(req.into_response(response)),
            };

            let pool = match req.app_data::<web::Data<Arc<PgPool>>>() {
                Some(pool) => pool.get_ref().clone(),
                None => {
                    return Ok(req.error_response(AppError::Internal(
                        "Database pool is not registered".to_string(),
                    )));
                }
            };

            match db::user::get_user_by_id(&*pool, claims.user_id).await {
                Ok(Some(user)) if Role::is_admin(&user.role) => {
                    srv.call(req).await.map(|res| res.map_into_boxed_body())
                }
                Ok(_) => {
                    log::warn!("User {} tried to access {}", claims.user_id, req.path());
                    Ok(req.error_response(AppError::Forbidden("Admin role required".to_string())))
                }
                Err(error) => Ok(req.error_response(error)),
            }
        })
    }
}
