use std::{env, str::FromStr, sync::Arc};

use crate::error::{AppError, Res};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// This struct holds all the necessary configuration parameters
/// required to initialize and run the server.
/// It includes database connection details, JWT configuration,
/// server host and port, number of worker threads, CORS settings,
/// logging preferences, admin accounts and the language-model client settings.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// The URL of the database to connect to.
    pub database_url: String,
    /// Configuration for JWT (JSON Web Token) authentication.
    pub jwt_config: JwtConfig,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// File the logger appends to, next to stdout.
    pub log_file: String,
    /// Emails that receive the admin role when they register.
    pub admin_emails: Vec<String>,
    /// Configuration for the chat-completion API.
    pub llm_config: LlmConfig,
}

#[derive(Clone, Debug)]
/// Configuration for JSON Web Token (JWT) authentication.
///
/// This struct contains the secret key used to sign JWTs and
/// the expiration time in hours for issued tokens.
pub struct JwtConfig {
    /// The secret key used to sign and verify JWTs.
    pub secret: String,
    /// The expiration time for JWTs in hours.
    pub expiration_hours: i64,
}

#[derive(Clone, Debug)]
/// Settings for the OpenAI-compatible chat-completion endpoint.
pub struct LlmConfig {
    pub api_key: String,
    /// Base URL without the trailing `/chat/completions`.
    pub base_url: String,
    pub model: String,
    /// How many of the most recent session messages are replayed as context.
    pub history_limit: i64,
}

/// Ten years.
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365 * 10;

impl JwtConfig {
    /// Reads the JWT configuration:
    /// - `JWT_SECRET`: Required. The secret key for JWT signing.
    /// - `JWT_EXPIRATION_HOURS`: Optional. Defaults to 168 hours (7 days).
    pub fn from_lookup<F>(lookup: &F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = required(lookup, "JWT_SECRET")?;
        if secret.trim().is_empty() {
            return Err(AppError::Config("JWT_SECRET must not be empty".to_string()));
        }

        let expiration_hours = parsed(lookup, "JWT_EXPIRATION_HOURS", 168)?;
        if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&expiration_hours) {
            return Err(AppError::Config(format!(
                "JWT_EXPIRATION_HOURS must be between 1 and {}",
                MAX_JWT_EXPIRATION_HOURS
            )));
        }

        Ok(JwtConfig {
            secret,
            expiration_hours,
        })
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables,
    /// loading a `.env` file first when one is present.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `DATABASE_URL`: Connection string for the database
    /// - `JWT_SECRET`: Secret key for JWT signing
    ///
    /// Optional (with defaults):
    /// - `ENVIRONMENT`: "development"
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 5000)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `LOG_FILE`: Log file path (default: "aras.log")
    /// - `ADMIN_EMAILS`: Comma separated admin emails (default: none)
    /// - `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `OPENAI_MODEL`, `CHAT_HISTORY_LIMIT`
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required variable is missing or a
    /// numeric value cannot be parsed.
    pub fn from_env() -> Res<Arc<Self>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok()).map(Arc::new)
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            environment: or_default("ENVIRONMENT", "development"),
            database_url: required(&lookup, "DATABASE_URL")?,
            jwt_config: JwtConfig::from_lookup(&lookup)?,
            server_host: or_default("IP", "127.0.0.1"),
            server_port: parsed(&lookup, "PORT", 5000)?,
            num_workers: parsed(&lookup, "WORKERS", 4)?,
            cors_allowed_origin: or_default("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
            console_logging_enabled: or_default("ENABLE_CONSOLE_LOGGING", "true").to_lowercase()
                == "true",
            log_file: or_default("LOG_FILE", "aras.log"),
            admin_emails: or_default("ADMIN_EMAILS", "")
                .split(',')
                .map(|email| email.trim().to_lowercase())
                .filter(|email| !email.is_empty())
                .collect(),
            llm_config: LlmConfig {
                api_key: or_default("OPENAI_API_KEY", ""),
                base_url: or_default("OPENAI_BASE_URL", "https://api.openai.com/v1")
                    .trim_end_matches('/')
                    .to_string(),
                model: or_default("OPENAI_MODEL", "gpt-4"),
                history_limit: positive(&lookup, "CHAT_HISTORY_LIMIT", 10)?,
            },
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_admin_email(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails.iter().any(|admin| *admin == email)
    }
}

fn required<F>(lookup: &F, key: &str) -> Res<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| AppError::Config(format!("{} must be set", key)))
}

fn parsed<F, T>(lookup: &F, key: &str, default: T) -> Res<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a valid number", key))),
        None => Ok(default),
    }
}

fn positive<F>(lookup: &F, key: &str, default: i64) -> Res<i64>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parsed(lookup, key, default)?;
    if value < 1 {
        return Err(AppError::Config(format!("{} must be at least 1", key)));
    }
    Ok(value)
}
