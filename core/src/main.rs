use std::net::TcpListener;

use aras_server::startup;
use common::env_config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env().map_err(std::io::Error::other)?;

    // init logger
    if config.console_logging_enabled {
        logger::setup(&config.log_file, config.is_production()).map_err(std::io::Error::other)?;
    }

    // init db connection
    let pool = db::setup(&config.database_url, config.is_production())
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let listener = TcpListener::bind((config.server_host.as_str(), config.server_port))?;
    log::info!(
        "Listening on {}:{} ({})",
        config.server_host,
        config.server_port,
        config.environment
    );

    startup::run(listener, pool, config)?.await
}
