use actix_web::{Responder, post, web};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::{self, ClaimsSpec};
use db::models::user::User;
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::services;

/// Registers a new user with email and password authentication.
///
/// # Input
/// - `req`: JSON payload `{ email, password, username? }`
/// - `pool`: Database connection pool
/// - `config`: Application configuration
///
/// # Output
/// - Success: 201 Created with `{ token, user }`
/// - Error: 400 Bad Request for missing/invalid input or an email that is already registered
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/auth/register', {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({
///     email: 'user@example.com',
///     password: 'securepassword',
///     username: 'closer' // Optional
///   })
/// });
///
/// if (response.ok) {
///   const { token, user } = await response.json();
///   localStorage.setItem('authToken', token);
/// }
/// ```
#[post("/register")]
pub async fn post_register(
    req: web::Json<RegisterRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let account = services::auth::validate_registration(&req)?;
    let email_exists = services::user::exists_user_by_email(pg_pool, &account.email).await?;
    if email_exists {
        return Err(AppError::BadRequest(
            "Email is already registered".to_string(),
        ));
    }
    let user = services::user::create_user_with_credentials(pg_pool, account, &config).await?;
    let token = issue_token(&user, &config)?;
    Success::created(AuthResponse { token, user })
}

/// Authenticates a user with email and password.
///
/// # Input
/// - `login_data`: JSON payload containing email and password
/// - `config`: Application configuration for JWT generation
/// - `pool`: Database connection pool
///
/// # Output
/// - Success: `{ token, user }`
/// - Error: 400 for missing fields, 401 Unauthorized for invalid credentials
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/api/auth/login', {
///   method: 'POST',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({ email: 'user@example.com', password: 'securepassword' })
/// });
///
/// if (response.ok) {
///   const authData = await response.json();
///   localStorage.setItem('authToken', authData.token);
/// }
/// ```
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let user = services::auth::authenticate_user(pg_pool, &login_data).await?;
    let token = issue_token(&user, &config)?;
    Success::ok(AuthResponse { token, user })
}

fn issue_token(user: &User, config: &Config) -> Res<String> {
    jwt::generate_jwt(
        ClaimsSpec {
            user_id: user.id,
            email: user.email.clone(),
        },
        &config.jwt_config,
    )
}
