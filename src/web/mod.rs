use axum::{middleware as axum_middleware, routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tera::Tera;
use tower_http::trace::TraceLayer;

use crate::mailer::MailSender;
use crate::presenters::Clock;
use crate::server::config::ServerConfig;
use crate::services::post_workflow::PostWorkflow;
use crate::web::{middleware::auth, routes::*};

pub mod error;
pub mod flash;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod views;

pub use error::AppError;

pub struct AppState {
    pub db_pool: DatabaseConnection,
    pub templates: Arc<Tera>,
    pub post_workflow: Arc<PostWorkflow>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<ServerConfig>,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

pub fn create_axum_router(
    db_pool: DatabaseConnection,
    templates: Arc<Tera>,
    mailer: Arc<dyn MailSender>,
    clock: Arc<dyn Clock>,
    config: Arc<ServerConfig>,
) -> Router {
    let post_workflow = Arc::new(PostWorkflow::new(
        db_pool.clone(),
        mailer,
        templates.clone(),
        clock.clone(),
        config.mail_from.clone(),
    ));

    let app_state = Arc::new(AppState {
        db_pool,
        templates,
        post_workflow,
        clock,
        config,
    });

    let protected = Router::new()
        .merge(standup_routes::create_standup_router())
        .merge(item_routes::create_item_router())
        .merge(post_routes::create_post_router())
        .merge(auth_routes::create_logout_router())
        .route_layer(axum_middleware::from_fn_with_state(app_state.clone(), auth::auth));

    Router::new()
        .route("/api/health", get(health_check_handler))
        .merge(auth_routes::create_login_router())
        .merge(protected)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
