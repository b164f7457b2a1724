use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::post,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::info;

use crate::db::services;
use crate::web::flash::{set_flash, Flash};
use crate::web::models::{non_blank, ItemForm};
use crate::web::{AppError, AppState};

pub fn create_item_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/standups/{standup_id}/items", post(create_item_handler))
        .route("/items/{item_id}/delete", post(delete_item_handler))
}

async fn create_item_handler(
    State(app_state): State<Arc<AppState>>,
    Path(standup_id): Path<i32>,
    jar: CookieJar,
    Form(form): Form<ItemForm>,
) -> Result<Response, AppError> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title can't be blank".to_string()));
    }
    services::get_standup_by_id(&app_state.db_pool, standup_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Standup {standup_id} not found")))?;

    let item = services::create_item(
        &app_state.db_pool,
        standup_id,
        form.kind,
        title,
        non_blank(form.description.as_deref()),
        non_blank(form.author.as_deref()),
    )
    .await?;
    info!(standup_id, item_id = item.id, kind = %item.kind, "Added item to board.");

    let jar = set_flash(jar, Flash::ItemAdded);
    Ok((jar, Redirect::to(&format!("/standups/{standup_id}"))).into_response())
}

async fn delete_item_handler(
    State(app_state): State<Arc<AppState>>,
    Path(item_id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let item = services::delete_board_item(&app_state.db_pool, item_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Board item {item_id} not found")))?;
    info!(standup_id = item.standup_id, item_id, "Removed item from board.");

    let jar = set_flash(jar, Flash::ItemDeleted);
    Ok((jar, Redirect::to(&format!("/standups/{}", item.standup_id))).into_response())
}
