use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use tera::Context;
use tracing::info;

use crate::services::auth_service;
use crate::web::middleware::auth::TOKEN_COOKIE;
use crate::web::models::LoginForm;
use crate::web::views::render;
use crate::web::{AppError, AppState};

pub fn create_login_router() -> Router<Arc<AppState>> {
    Router::new().route("/login", get(login_page).post(login_handler))
}

pub fn create_logout_router() -> Router<Arc<AppState>> {
    Router::new().route("/logout", post(logout_handler))
}

async fn login_page(State(app_state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let context = Context::new();
    Ok(render(&app_state.templates, "login.html", &context)?.into_response())
}

async fn login_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let user = match auth_service::authenticate(&app_state.db_pool, &form.username, &form.password).await {
        Ok(user) => user,
        Err(AppError::InvalidCredentials) => {
            let mut context = Context::new();
            context.insert("error", "Invalid username or password.");
            context.insert("username", &form.username);
            let page = render(&app_state.templates, "login.html", &context)?;
            return Ok((StatusCode::UNAUTHORIZED, page).into_response());
        }
        Err(e) => return Err(e),
    };

    let token = auth_service::create_jwt_for_user(&user, &app_state.config.jwt_secret)?;
    let auth_cookie = Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(app_state.config.cookie_secure)
        .build();

    info!(user_id = user.id, username = %user.username, "User logged in.");
    Ok((jar.add(auth_cookie), Redirect::to("/")).into_response())
}

async fn logout_handler(jar: CookieJar) -> impl IntoResponse {
    (jar.remove(Cookie::build(TOKEN_COOKIE).path("/")), Redirect::to("/login"))
}
