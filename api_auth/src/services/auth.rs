use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use common::error::{AppError, Res};
use db::models::user::User;
use sqlx::PgPool;

use crate::dtos::auth::{LoginRequest, RegisterRequest};

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration input after validation and normalization.
#[derive(Debug, PartialEq)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Checks the registration payload.
/// Emails are trimmed and lowercased; the username defaults to the local
/// part of the email.
pub fn validate_registration(req: &RegisterRequest) -> Res<NewAccount> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let local_part = match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => local.to_string(),
        _ => return Err(AppError::BadRequest("Invalid email address".to_string())),
    };

    if req.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }

    let username = req
        .username
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or(local_part);

    Ok(NewAccount {
        email,
        username,
        password: req.password.clone(),
    })
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hashes a password with Argon2 and a random salt (PHC string format).
pub fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> Res<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Authenticates existing user.
/// Unknown email and wrong password both return 401 with the same message.
pub async fn authenticate_user(pool: &PgPool, login_data: &LoginRequest) -> Res<User> {
    let email = normalize_email(&login_data.email);
    if email.is_empty() || login_data.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let (user, credentials) = db::user::get_user_with_password_hash(pool, &email)
        .await?
        .ok_or_else(invalid)?;

    if verify_password(&login_data.password, &credentials.password_hash)? {
        Ok(user)
    } else {
        log::warn!("Failed login attempt for user {}", user.id);
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str, username: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            username: username.map(str::to_string),
        }
    }

    #[test]
    fn username_defaults_to_local_part() {
        let account = validate_registration(&register(" Lena.Kraus@Aras.AI ", "geheim1", None))
            .unwrap();
        assert_eq!(account.email, "lena.kraus@aras.ai");
        assert_eq!(account.username, "lena.kraus");
    }

    #[test]
    fn explicit_username_is_kept() {
        let account =
            validate_registration(&register("a@b.de", "123456", Some("  closer  "))).unwrap();
        assert_eq!(account.username, "closer");

        let blank = validate_registration(&register("a@b.de", "123456", Some("   "))).unwrap();
        assert_eq!(blank.username, "a");
    }

    #[test]
    fn short_password_is_rejected() {
        let err = validate_registration(&register("a@b.de", "12345", None)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m.contains("at least 6")));
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(matches!(
            validate_registration(&register("", "123456", None)),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            validate_registration(&register("a@b.de", "", None)),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["plainaddress", "@aras.ai", "sales@"] {
            assert!(
                matches!(
                    validate_registration(&register(email, "123456", None)),
                    Err(AppError::BadRequest(_))
                ),
                "{}",
                email
            );
        }
    }

    #[test]
    fn password_hash_verifies_only_the_original() {
        let hash = hash_password("correct horse").unwrap();
        assert_ne!(hash, "correct horse");
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn corrupt_hash_is_internal_error() {
        assert!(matches!(
            verify_password("x", "not-a-phc-string"),
            Err(AppError::Internal(_))
        ));
    }
}
