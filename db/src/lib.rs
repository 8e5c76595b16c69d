use std::{str::FromStr, sync::Arc};

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use url::Url;

pub mod chat;
pub mod user;

pub mod models {
    pub mod chat;
    pub mod user;
}

pub mod dtos {
    pub mod chat;
    pub mod user;
}

type SetupError = Box<dyn std::error::Error>;

/// Connects to the database named in `database_url`, creating it first when
/// it does not exist yet, and runs the embedded migrations.
pub async fn setup(database_url: &str, require_ssl: bool) -> Result<Arc<PgPool>, SetupError> {
    let (maintenance_url, db_name) = split_database_url(database_url)?;
    ensure_database(&maintenance_url, &db_name, require_ssl).await?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(connect_options(database_url, require_ssl)?)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Database {} is migrated", db_name);

    Ok(Arc::new(pool))
}

/// Splits a connection URL into the URL of the `postgres` maintenance
/// database on the same server and the name of the target database.
fn split_database_url(database_url: &str) -> Result<(String, String), SetupError> {
    let mut url = Url::parse(database_url)?;
    let db_name = url.path().trim_start_matches('/').to_string();
    if db_name.is_empty() {
        return Err(format!("No database name in {}", database_url).into());
    }
    url.set_path("/postgres");
    Ok((url.to_string(), db_name))
}

fn connect_options(url: &str, require_ssl: bool) -> Result<PgConnectOptions, sqlx::Error> {
    let options = PgConnectOptions::from_str(url)?;
    Ok(if require_ssl {
        options.ssl_mode(PgSslMode::Require)
    } else {
        options
    })
}

async fn ensure_database(
    maintenance_url: &str,
    db_name: &str,
    require_ssl: bool,
) -> Result<(), sqlx::Error> {
    let admin_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(connect_options(maintenance_url, require_ssl)?)
        .await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(db_name)
            .fetch_one(&admin_pool)
            .await?;

    if !exists {
        log::info!("Creating database {}", db_name);
        sqlx::query(&format!("CREATE DATABASE \"{}\"", db_name.replace('"', "\"\"")))
            .execute(&admin_pool)
            .await?;
    }

    admin_pool.close().await;
    Ok(())
}
