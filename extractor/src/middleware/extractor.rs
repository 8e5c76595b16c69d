use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use futures::future::{Ready, ok};

use common::{
    env_config::Config,
    error::{AppError, Res},
    jwt::{self, JwtClaims},
};

/// Decodes the bearer token, when present, and stores the outcome as
/// `Res<JwtClaims>` in the request extensions. It never rejects a request;
/// guards further down decide what a missing or invalid token means.
pub struct BearerClaimsMiddleware {}

impl BearerClaimsMiddleware {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for BearerClaimsMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerClaimsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = BearerClaimsService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(BearerClaimsService {
            service: Arc::new(service),
        })
    }
}

pub struct BearerClaimsService<S> {
    service: Arc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerClaimsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // retrieve token from authorization header
        let auth_header = bearer_token(&req);

        let secret = req
            .app_data::<web::Data<Arc<Config>>>()
            .map(|config| config.jwt_config.secret.clone());
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            if let Some(token) = auth_header {
                // validate token and insert claims to request object for future use
                let claims_res = match secret {
                    Some(secret) => jwt::validate_jwt(&token, &secret),
                    None => Err(AppError::Internal(
                        "JWT configuration is not registered".to_string(),
                    )),
                };
                req.extensions_mut().insert::<Res<JwtClaims>>(claims_res);
            }
            srv.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_owned())
        .filter(|token| !token.is_empty())
}
