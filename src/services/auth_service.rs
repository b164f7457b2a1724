use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::db::entities::user;
use crate::db::services::{create_user, get_user_by_username};
use crate::web::error::AppError;
use crate::web::models::Claims;

const TOKEN_LIFETIME_HOURS: i64 = 24;

pub async fn register_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model, AppError> {
    let username = username.trim();
    if username.is_empty() || password.len() < 8 {
        return Err(AppError::InvalidInput(
            "Username must not be empty and the password needs at least 8 characters.".to_string(),
        ));
    }

    if get_user_by_username(db, username).await?.is_some() {
        return Err(AppError::Conflict(format!("User {username} already exists.")));
    }

    let password_hash = hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {e}")))?;

    Ok(create_user(db, username, &password_hash).await?)
}

pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model, AppError> {
    if username.is_empty() || password.is_empty() {
        return Err(AppError::InvalidCredentials);
    }

    let user = get_user_by_username(db, username.trim())
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let valid_password = verify(password, &user.password_hash)
        .map_err(|e| AppError::InternalServerError(format!("Password verification failed: {e}")))?;
    if !valid_password {
        warn!(username = %user.username, "Rejected login with wrong password.");
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

pub fn create_jwt_for_user(user: &user::Model, jwt_secret: &str) -> Result<String, AppError> {
    let expiration = (Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp() as usize;
    let claims = Claims {
        sub: user.username.clone(),
        user_id: user.id,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token creation failed: {e}")))
}

pub fn decode_jwt(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        warn!(error = ?e, "JWT decoding failed.");
        AppError::InvalidCredentials
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> user::Model {
        user::Model {
            id: 3,
            username: "arthur".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trips_with_same_secret() {
        let token = create_jwt_for_user(&user(), "round-table").unwrap();
        let claims = decode_jwt(&token, "round-table").unwrap();

        assert_eq!(claims.user_id, 3);
        assert_eq!(claims.sub, "arthur");
    }

    #[test]
    fn token_rejected_with_other_secret() {
        let token = create_jwt_for_user(&user(), "round-table").unwrap();
        assert!(matches!(decode_jwt(&token, "holy-grail"), Err(AppError::InvalidCredentials)));
    }
}
