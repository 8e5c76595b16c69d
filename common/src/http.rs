use actix_web::{HttpResponse, Responder, http::StatusCode};
use serde::Serialize;

use crate::error::Res;

/// JSON success responses for handlers returning `Res<impl Responder>`.
pub struct Success;

impl Success {
    /// 201 with `body`.
    pub fn created<T: Serialize>(body: T) -> Res<impl Responder> {
        Ok(Self::json(StatusCode::CREATED, body))
    }

    /// 200 with `body`.
    pub fn ok<T: Serialize>(body: T) -> Res<impl Responder> {
        Ok(Self::json(StatusCode::OK, body))
    }

    fn json<T: Serialize>(status: StatusCode, body: T) -> HttpResponse {
        HttpResponse::build(status).json(body)
    }
}
