use axum::{
    extract::{Extension, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::info;

use crate::db::enums::ItemKind;
use crate::db::services::{self, StandupParams};
use crate::presenters::StandupPresenter;
use crate::web::flash::{set_flash, take_flash, Flash};
use crate::web::models::AuthenticatedUser;
use crate::web::views::{page_context, render};
use crate::web::{AppError, AppState};

pub fn create_standup_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_handler))
        .route("/standups", post(create_standup_handler))
        .route("/standups/new", get(new_standup_handler))
        .route(
            "/standups/{standup_id}",
            get(show_standup_handler).post(update_standup_handler),
        )
        .route("/standups/{standup_id}/edit", get(edit_standup_handler))
}

async fn index_handler(
    Extension(user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let (jar, flash) = take_flash(jar);
    let standups = services::get_all_standups(&app_state.db_pool).await?;

    let mut context = page_context(&user, flash);
    context.insert("standups", &standups);
    let page = render(&app_state.templates, "standups/index.html", &context)?;
    Ok((jar, page).into_response())
}

async fn new_standup_handler(
    Extension(user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
) -> Result<Html<String>, AppError> {
    let mut context = page_context(&user, None);
    context.insert("standup", &StandupParams::default());
    context.insert("action", "/standups");
    context.insert("is_new", &true);
    render(&app_state.templates, "standups/form.html", &context)
}

async fn create_standup_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(params): Form<StandupParams>,
) -> Result<Response, AppError> {
    validate_standup(&params)?;
    let standup = services::create_standup(&app_state.db_pool, params).await?;
    info!(standup_id = standup.id, title = %standup.title, "Created standup.");

    let jar = set_flash(jar, Flash::StandupSaved);
    Ok((jar, Redirect::to(&format!("/standups/{}", standup.id))).into_response())
}

async fn show_standup_handler(
    Extension(user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Path(standup_id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let standup = services::get_standup_by_id(&app_state.db_pool, standup_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Standup {standup_id} not found")))?;
    let items = services::get_board_items(&app_state.db_pool, standup_id).await?;

    let (jar, flash) = take_flash(jar);
    let mut context = page_context(&user, flash);

    {
        let presenter = StandupPresenter::new(&standup, &*app_state.clock);
        let mut rng = rand::rng();
        context.insert("closing_message", &presenter.closing_message(&mut rng));
        context.insert("closing_image", &presenter.closing_image(&mut rng));
        context.insert("last_email_time_message", &presenter.last_email_time_message());
        context.insert("confirm_message", presenter.create_post_confirm_message());
        context.insert("button_text", presenter.create_post_button_text());
        context.insert("sender_placeholder", presenter.create_post_sender_field_placeholder());
        context.insert("subject_placeholder", presenter.create_post_subject_field_placeholder());
    }

    let kinds: Vec<&str> = ItemKind::ALL.iter().map(|kind| kind.label()).collect();
    context.insert("standup", &standup);
    context.insert("sections", &services::group_by_kind(items));
    context.insert("item_kinds", &kinds);

    let page = render(&app_state.templates, "standups/show.html", &context)?;
    Ok((jar, page).into_response())
}

async fn edit_standup_handler(
    Extension(user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Path(standup_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let standup = services::get_standup_by_id(&app_state.db_pool, standup_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Standup {standup_id} not found")))?;

    let mut context = page_context(&user, None);
    context.insert("standup", &standup);
    context.insert("action", &format!("/standups/{standup_id}"));
    context.insert("is_new", &false);
    render(&app_state.templates, "standups/form.html", &context)
}

async fn update_standup_handler(
    State(app_state): State<Arc<AppState>>,
    Path(standup_id): Path<i32>,
    jar: CookieJar,
    Form(params): Form<StandupParams>,
) -> Result<Response, AppError> {
    validate_standup(&params)?;
    let standup = services::update_standup(&app_state.db_pool, standup_id, params).await?;
    info!(standup_id = standup.id, "Updated standup.");

    let jar = set_flash(jar, Flash::StandupSaved);
    Ok((jar, Redirect::to(&format!("/standups/{}", standup.id))).into_response())
}

fn validate_standup(params: &StandupParams) -> Result<(), AppError> {
    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title can't be blank".to_string()));
    }
    if params.to_address.trim().is_empty() {
        return Err(AppError::InvalidInput("To address can't be blank".to_string()));
    }
    Ok(())
}
