use axum::{
    body::Body as AxumBody,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::services::auth_service;
use crate::web::models::AuthenticatedUser;
use crate::web::{error::AppError, AppState};

pub const TOKEN_COOKIE: &str = "token";

pub async fn auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut req: Request<AxumBody>,
    next: Next,
) -> Result<Response, AppError> {
    // Authorization header first, then the login cookie
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|s| s.to_string())
        .or_else(|| jar.get(TOKEN_COOKIE).map(|c| c.value().to_string()))
        .ok_or_else(|| AppError::Unauthorized("Missing token".to_string()))?;

    let claims = auth_service::decode_jwt(&token, &state.config.jwt_secret)?;

    req.extensions_mut().insert(AuthenticatedUser {
        id: claims.user_id,
        username: claims.sub,
    });
    Ok(next.run(req).await)
}
