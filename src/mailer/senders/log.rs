use async_trait::async_trait;
use tracing::info;

use super::{MailSender, SenderError};
use crate::mailer::models::MailMessage;

/// Writes emails to the log instead of delivering them. Used when no mail relay is configured.
#[derive(Debug, Default)]
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), SenderError> {
        info!(
            from = %message.from,
            to = %message.to,
            subject = %message.subject,
            body_len = message.body.len(),
            "No mail relay configured; standup email logged only."
        );
        Ok(())
    }
}
