use async_trait::async_trait;
use thiserror::Error;

use super::models::MailMessage;

pub mod log;
pub mod webhook;

#[derive(Error, Debug)]
pub enum SenderError {
    #[error("Failed to send email: {0}")]
    SendFailed(String),
    #[error("Invalid configuration for sender: {0}")]
    InvalidConfiguration(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Templating error: {0}")]
    TemplatingError(String),
}

/// Delivers rendered standup emails.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<(), SenderError>;
}
