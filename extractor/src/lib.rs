use middleware::extractor::BearerClaimsMiddleware;

pub mod middleware {
    pub mod extractor;
}

pub fn middleware() -> BearerClaimsMiddleware {
    BearerClaimsMiddleware::new()
}
