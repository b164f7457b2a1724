use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};
use std::sync::Arc;
use tera::Tera;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::db::entities::{post, standup};
use crate::db::services::{
    get_items_for_post, get_post_by_id, get_standup_by_id, insert_post, mark_post_archived,
    mark_post_sent, move_board_items_to_post, record_email_sent,
};
use crate::mailer::render::render_post_email;
use crate::mailer::{MailSender, SenderError};
use crate::presenters::{Clock, StandupPresenter};

#[derive(Error, Debug)]
pub enum PostError {
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
    #[error("Standup not found: {0}")]
    StandupNotFound(i32),
    #[error("Post not found: {0}")]
    PostNotFound(i32),
    #[error("Post {0} has already been emailed")]
    AlreadySent(i32),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Mail error: {0}")]
    Mail(#[from] SenderError),
}

/// What a post submission ended in.
#[derive(Debug, Clone)]
pub enum PostOutcome {
    /// Multi-step standups: the post waits for an explicit send and archive.
    Pending(post::Model),
    /// One-click standups: emailed and archived.
    Archived(post::Model),
}

/// Turns the board into posts, emails them and archives them.
pub struct PostWorkflow {
    db: DatabaseConnection,
    mailer: Arc<dyn MailSender>,
    templates: Arc<Tera>,
    clock: Arc<dyn Clock>,
    mail_from: String,
}

impl PostWorkflow {
    pub fn new(
        db: DatabaseConnection,
        mailer: Arc<dyn MailSender>,
        templates: Arc<Tera>,
        clock: Arc<dyn Clock>,
        mail_from: String,
    ) -> Self {
        Self {
            db,
            mailer,
            templates,
            clock,
            mail_from,
        }
    }

    /// Creates a post from the board, sending and archiving it too when the standup is one-click.
    pub async fn submit_post(
        &self,
        standup: &standup::Model,
        sender: &str,
        title: &str,
    ) -> Result<PostOutcome, PostError> {
        if standup.one_click_post {
            self.one_click_post(standup, sender, title)
                .await
                .map(PostOutcome::Archived)
        } else {
            self.create_post(standup, sender, title)
                .await
                .map(PostOutcome::Pending)
        }
    }

    /// Moves the board items into a new pending post.
    pub async fn create_post(
        &self,
        standup: &standup::Model,
        sender: &str,
        title: &str,
    ) -> Result<post::Model, PostError> {
        let (sender, title) = validate_post_fields(sender, title)?;

        let txn = self.db.begin().await?;
        let post = insert_post(&txn, standup.id, title, sender).await?;
        let moved = move_board_items_to_post(&txn, standup.id, post.id).await?;
        txn.commit().await?;

        info!(standup_id = standup.id, post_id = post.id, items = moved, "Created post from board.");
        Ok(post)
    }

    pub async fn send_post_email(&self, post_id: i32) -> Result<post::Model, PostError> {
        let post = get_post_by_id(&self.db, post_id)
            .await?
            .ok_or(PostError::PostNotFound(post_id))?;
        if post.is_sent() {
            return Err(PostError::AlreadySent(post_id));
        }
        let standup = get_standup_by_id(&self.db, post.standup_id)
            .await?
            .ok_or(PostError::StandupNotFound(post.standup_id))?;

        self.deliver(&self.db, &standup, post).await
    }

    /// Archiving an archived post returns it unchanged.
    pub async fn archive_post(&self, post_id: i32) -> Result<post::Model, PostError> {
        let post = get_post_by_id(&self.db, post_id)
            .await?
            .ok_or(PostError::PostNotFound(post_id))?;
        if post.archived {
            return Ok(post);
        }

        let post = mark_post_archived(&self.db, post).await?;
        info!(post_id = post.id, standup_id = post.standup_id, "Archived post.");
        Ok(post)
    }

    /// Create, send and archive in one transaction. A failed send leaves the board as it was.
    pub async fn one_click_post(
        &self,
        standup: &standup::Model,
        sender: &str,
        title: &str,
    ) -> Result<post::Model, PostError> {
        let (sender, title) = validate_post_fields(sender, title)?;

        let txn = self.db.begin().await?;
        let post = insert_post(&txn, standup.id, title, sender).await?;
        move_board_items_to_post(&txn, standup.id, post.id).await?;

        let post = match self.deliver(&txn, standup, post).await {
            Ok(post) => post,
            Err(e) => {
                warn!(standup_id = standup.id, error = %e, "One-click post failed; rolling back.");
                if let Err(rollback_err) = txn.rollback().await {
                    error!(standup_id = standup.id, error = %rollback_err, "Error rolling back one-click post.");
                }
                return Err(e);
            }
        };
        let post = mark_post_archived(&txn, post).await?;
        txn.commit().await?;

        info!(standup_id = standup.id, post_id = post.id, "Sent and archived post in one step.");
        Ok(post)
    }

    async fn deliver<C: ConnectionTrait>(
        &self,
        conn: &C,
        standup: &standup::Model,
        post: post::Model,
    ) -> Result<post::Model, PostError> {
        let items = get_items_for_post(conn, post.id).await?;
        let closing_message =
            StandupPresenter::new(standup, &*self.clock).closing_message(&mut rand::rng());
        let message = render_post_email(
            &self.templates,
            &self.mail_from,
            standup,
            &post,
            items,
            &closing_message,
        )?;

        self.mailer.send(&message).await?;

        let sent_at = Utc::now();
        let post = mark_post_sent(conn, post, sent_at).await?;
        record_email_sent(conn, standup.id, sent_at).await?;
        info!(post_id = post.id, to = %message.to, subject = %message.subject, "Sent standup email.");
        Ok(post)
    }
}

fn validate_post_fields<'a>(sender: &'a str, title: &'a str) -> Result<(&'a str, &'a str), PostError> {
    let sender = sender.trim();
    let title = title.trim();
    if title.is_empty() {
        return Err(PostError::InvalidInput("Subject can't be blank".to_string()));
    }
    if sender.is_empty() {
        return Err(PostError::InvalidInput("Sender can't be blank".to_string()));
    }
    Ok((sender, title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_post_fields() {
        assert_eq!(validate_post_fields("  Me ", " empty post ").unwrap(), ("Me", "empty post"));
    }

    #[test]
    fn rejects_blank_subject_or_sender() {
        assert!(matches!(validate_post_fields("Me", "  "), Err(PostError::InvalidInput(_))));
        assert!(matches!(validate_post_fields("", "subject"), Err(PostError::InvalidInput(_))));
    }
}
