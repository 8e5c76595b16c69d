use std::{sync::Arc, time::Instant};

use actix_web::{
    Error, HttpMessage,
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use colored::Colorize;
use common::{error::Res, jwt::JwtClaims};
use futures::future::{LocalBoxFuture, Ready, ready};
use log::info;
use uuid::Uuid;

/// Logs one line per request: status, method, path, elapsed time and the
/// caller's user id when the extractor found a valid token.
pub struct LoggerMiddleware {
    enabled: bool,
}

impl LoggerMiddleware {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = LoggerMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LoggerMiddlewareService {
            service: Arc::new(service),
            enabled: self.enabled,
        }))
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Arc<S>,
    enabled: bool,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = Arc::clone(&self.service);

        if !self.enabled {
            return Box::pin(async move { srv.call(req).await.map(|res| res.map_into_boxed_body()) });
        }

        let method = req.method().to_string();
        let path = req.path().to_string();
        let query_string = req.query_string().to_string();
        let user_id = caller_id(&req);
        let started = Instant::now();

        Box::pin(async move {
            let res = srv.call(req).await?;
            let status_code = res.status().as_u16();
            let elapsed_ms = started.elapsed().as_millis();

            let colored_status = match status_code {
                200..=299 => status_code.to_string().green(),
                300..=399 => status_code.to_string().yellow(),
                400..=499 => status_code.to_string().bright_red(),
                _ => status_code.to_string().red(),
            };

            let colored_method = match method.as_str() {
                "GET" => method.blue(),
                "POST" => method.yellow(),
                "PUT" => method.purple(),
                "DELETE" => method.red(),
                _ => method.normal(),
            };

            info!(
                "[{}] {} {} {} user_id={} params={}",
                colored_status,
                colored_method,
                path.bright_white(),
                format!("({}ms)", elapsed_ms).bright_black(),
                user_id
                    .map_or("None".to_string(), |id| id.to_string())
                    .bright_blue(),
                query_string.bright_cyan(),
            );

            Ok(res.map_into_boxed_body())
        })
    }
}

/// User id of a valid token, if the extractor found one.
fn caller_id(req: &ServiceRequest) -> Option<Uuid> {
    req.extensions()
        .get::<Res<JwtClaims>>()
        .and_then(|claims| claims.as_ref().ok())
        .map(|claims| claims.user_id)
}
