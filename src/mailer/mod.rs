//! Outgoing standup email: message rendering and delivery.

pub mod models;
pub mod render;
pub mod senders;

pub use models::MailMessage;
pub use senders::{MailSender, SenderError};
