use axum::response::Html;
use tera::{Context, Tera};

use super::error::AppError;
use super::models::AuthenticatedUser;

/// Context shared by every logged-in page.
pub fn page_context(user: &AuthenticatedUser, flash: Option<&str>) -> Context {
    let mut context = Context::new();
    context.insert("current_user", user);
    context.insert("flash", &flash);
    context
}

pub fn render(templates: &Tera, name: &str, context: &Context) -> Result<Html<String>, AppError> {
    Ok(Html(templates.render(name, context)?))
}
