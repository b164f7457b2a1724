use tera::{Context, Tera};

use super::models::MailMessage;
use super::senders::SenderError;
use crate::db::entities::{item, post, standup};
use crate::db::services::group_by_kind;

pub const POST_EMAIL_TEMPLATE: &str = "post_email.txt";

/// `<prefix> <title>`, or just the title when the standup has no prefix.
pub fn email_subject(subject_prefix: &str, title: &str) -> String {
    let prefix = subject_prefix.trim();
    if prefix.is_empty() {
        title.trim().to_string()
    } else {
        format!("{} {}", prefix, title.trim())
    }
}

pub fn render_post_email(
    templates: &Tera,
    from: &str,
    standup: &standup::Model,
    post: &post::Model,
    items: Vec<item::Model>,
    closing_message: &str,
) -> Result<MailMessage, SenderError> {
    let mut context = Context::new();
    context.insert("standup", standup);
    context.insert("post", post);
    context.insert("sections", &group_by_kind(items));
    context.insert("closing_message", closing_message);

    let body = templates
        .render(POST_EMAIL_TEMPLATE, &context)
        .map_err(|e| SenderError::TemplatingError(e.to_string()))?;

    Ok(MailMessage {
        from: from.to_string(),
        to: standup.to_address.clone(),
        subject: email_subject(&standup.subject_prefix, &post.title),
        body,
    })
}
