use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

use super::{MailSender, SenderError};
use crate::mailer::models::MailMessage;

/// Upper bound on one relay round-trip. One-click posts hold a write transaction while sending.
pub const RELAY_TIMEOUT: Duration = Duration::from_secs(10);

/// Hands emails to an HTTP mail relay as a JSON POST.
pub struct WebhookMailSender {
    client: Client,
    url: Url,
}

impl WebhookMailSender {
    pub fn new(url: &str) -> Result<Self, SenderError> {
        Self::with_timeout(url, RELAY_TIMEOUT)
    }

    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, SenderError> {
        let url = Url::parse(url)
            .map_err(|e| SenderError::InvalidConfiguration(format!("Invalid mail relay URL: {e}")))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl MailSender for WebhookMailSender {
    async fn send(&self, message: &MailMessage) -> Result<(), SenderError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(message)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(SenderError::SendFailed(format!(
                "Mail relay returned non-success status: {status}. Body: {error_body}"
            )));
        }

        Ok(())
    }
}
