use actix_cors::Cors;
use actix_web::http::header;

/// CORS policy for the browser client. `origins` is the comma separated
/// `CORS_ALLOWED_ORIGIN` value.
pub fn middleware(origins: &str) -> Cors {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .supports_credentials()
        .max_age(3600)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, http::header, test, web};

    use super::*;

    #[actix_web::test]
    async fn every_listed_origin_is_allowed() {
        let app = test::init_service(
            App::new()
                .wrap(middleware("http://localhost:3000, https://app.aras.ai"))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        for origin in ["http://localhost:3000", "https://app.aras.ai"] {
            let res = test::call_service(
                &app,
                test::TestRequest::get()
                    .uri("/ping")
                    .insert_header((header::ORIGIN, origin))
                    .to_request(),
            )
            .await;
            assert_eq!(
                res.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
                origin
            );
        }
    }
}
