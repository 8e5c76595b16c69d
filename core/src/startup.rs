use std::{net::TcpListener, sync::Arc};

use actix_web::{App, HttpServer, dev::Server, web};
use api_chat::llm::LlmClient;
use common::{env_config::Config, error::AppError};
use sqlx::PgPool;

use crate::cors;

/// Builds the HTTP server on an already bound listener.
/// The returned `Server` does nothing until awaited or spawned.
pub fn run(listener: TcpListener, pool: Arc<PgPool>, config: Arc<Config>) -> std::io::Result<Server> {
    let origin = config.cors_allowed_origin.clone();
    let console_logging_enabled = config.console_logging_enabled;
    let llm_client = web::Data::new(LlmClient::new(&config.llm_config));
    let pool = web::Data::new(pool);
    let config_data = web::Data::new(config.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(config_data.clone())
            .app_data(llm_client.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(format!("Invalid path: {}", err)).into()
            }))
            .wrap(logger::middleware(console_logging_enabled)) // 3rd
            .wrap(extractor::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(
                web::scope("/api")
                    .service(api_auth::mount_auth())
                    .service(api_auth::mount_user().wrap(api_auth::auth_middleware()))
                    .service(api_chat::mount_chat().wrap(api_auth::auth_middleware()))
                    .service(
                        api_admin::mount_admin()
                            .wrap(api_admin::admin_middleware())
                            .wrap(api_auth::auth_middleware()),
                    ),
            )
    })
    .listen(listener)?
    .workers(config.num_workers)
    .run();

    Ok(server)
}
