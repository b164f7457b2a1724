use axum::{
    extract::{Extension, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::db::services;
use crate::presenters::standup_presenter::format_email_time;
use crate::services::post_workflow::PostOutcome;
use crate::web::flash::{set_flash, take_flash, Flash};
use crate::web::models::{AuthenticatedUser, PostForm};
use crate::web::views::{page_context, render};
use crate::web::{AppError, AppState};

const SEND_EMAIL_CONFIRM_MESSAGE: &str = "You are about to send today's stand up email. Continue?";

pub fn create_post_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/standups/{standup_id}/posts",
            get(posts_handler).post(create_post_handler),
        )
        .route("/posts/{post_id}", get(show_post_handler))
        .route("/posts/{post_id}/send_email", post(send_email_handler))
        .route("/posts/{post_id}/archive", post(archive_post_handler))
}

async fn create_post_handler(
    State(app_state): State<Arc<AppState>>,
    Path(standup_id): Path<i32>,
    jar: CookieJar,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let standup = services::get_standup_by_id(&app_state.db_pool, standup_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Standup {standup_id} not found")))?;

    let outcome = app_state
        .post_workflow
        .submit_post(&standup, &form.sender, &form.title)
        .await?;

    let response = match outcome {
        PostOutcome::Archived(_) => (
            set_flash(jar, Flash::EmailSent),
            Redirect::to(&format!("/standups/{standup_id}")),
        )
            .into_response(),
        PostOutcome::Pending(post) => {
            (jar, Redirect::to(&format!("/posts/{}", post.id))).into_response()
        }
    };
    Ok(response)
}

async fn show_post_handler(
    Extension(user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Path(post_id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let post = services::get_post_by_id(&app_state.db_pool, post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {post_id} not found")))?;
    let standup = services::get_standup_by_id(&app_state.db_pool, post.standup_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Standup {} not found", post.standup_id)))?;
    let items = services::get_items_for_post(&app_state.db_pool, post.id).await?;

    let (jar, flash) = take_flash(jar);
    let mut context = page_context(&user, flash);
    let sent_message = post
        .sent_at
        .map(|sent_at| format!("This email was sent at {}", format_email_time(&*app_state.clock, sent_at)));

    context.insert("post", &post);
    context.insert("standup", &standup);
    context.insert("sections", &services::group_by_kind(items));
    context.insert("sent_message", &sent_message);
    context.insert("send_confirm_message", SEND_EMAIL_CONFIRM_MESSAGE);

    let page = render(&app_state.templates, "posts/show.html", &context)?;
    Ok((jar, page).into_response())
}

async fn send_email_handler(
    State(app_state): State<Arc<AppState>>,
    Path(post_id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let post = app_state.post_workflow.send_post_email(post_id).await?;

    let jar = set_flash(jar, Flash::EmailSent);
    Ok((jar, Redirect::to(&format!("/posts/{}", post.id))).into_response())
}

async fn archive_post_handler(
    State(app_state): State<Arc<AppState>>,
    Path(post_id): Path<i32>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let post = app_state.post_workflow.archive_post(post_id).await?;

    let jar = set_flash(jar, Flash::PostArchived);
    Ok((jar, Redirect::to(&format!("/standups/{}", post.standup_id))).into_response())
}

/// The "Posts" menu: posts still waiting to be sent or archived, then the archive.
async fn posts_handler(
    Extension(user): Extension<AuthenticatedUser>,
    State(app_state): State<Arc<AppState>>,
    Path(standup_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let standup = services::get_standup_by_id(&app_state.db_pool, standup_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Standup {standup_id} not found")))?;
    let pending_posts = services::get_pending_posts(&app_state.db_pool, standup_id).await?;
    let posts = services::get_archived_posts(&app_state.db_pool, standup_id).await?;

    let mut context = page_context(&user, None);
    context.insert("standup", &standup);
    context.insert("pending_posts", &pending_posts);
    context.insert("posts", &posts);
    render(&app_state.templates, "posts/index.html", &context)
}
